//! Gateway - TCP listener that admits incoming connections.
//!
//! The Gateway binds the listening socket and spawns a Connection task per
//! admitted client. Admission is paced by the accept throttle and bounded by
//! the registry capacity; a connection that would exceed capacity is closed
//! without a word and consumes no uid.

use crate::config::ListenConfig;
use crate::handlers::Dispatcher;
use crate::metrics;
use crate::network::Connection;
use crate::network::throttle::AcceptThrottle;
use crate::state::{Matrix, Session};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

/// The Gateway accepts incoming TCP connections and spawns session tasks.
pub struct Gateway {
    listener: TcpListener,
    throttle: AcceptThrottle,
    matrix: Arc<Matrix>,
    dispatcher: Arc<Dispatcher>,
}

impl Gateway {
    /// Bind the gateway to the configured address.
    pub fn bind(
        config: &ListenConfig,
        matrix: Arc<Matrix>,
        dispatcher: Arc<Dispatcher>,
    ) -> anyhow::Result<Self> {
        let socket = if config.address.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(config.address)?;
        let listener = socket.listen(config.backlog)?;

        let addr = listener.local_addr()?;
        info!(%addr, backlog = config.backlog, "Chat listener bound");

        let throttle = AcceptThrottle::new(
            matrix.limits.accept_rate_per_second,
            matrix.limits.accept_burst,
        );

        Ok(Self {
            listener,
            throttle,
            matrix,
            dispatcher,
        })
    }

    /// Run the gateway until `shutdown` resolves.
    ///
    /// Live sessions are aborted on shutdown.
    #[instrument(skip_all, name = "gateway")]
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut sessions = JoinSet::new();
        tokio::pin!(shutdown);

        // Lives across iterations so a reaped session never drops a taken token.
        let accept = self.next_connection();
        tokio::pin!(accept);

        loop {
            tokio::select! {
                accepted = &mut accept => {
                    accept.set(self.next_connection());
                    match accepted {
                        Ok((stream, addr)) => self.admit(&mut sessions, stream, addr),
                        Err(e) => error!(error = %e, "Failed to accept connection"),
                    }
                }
                Some(finished) = sessions.join_next(), if !sessions.is_empty() => {
                    if let Err(e) = finished
                        && e.is_panic()
                    {
                        error!(error = %e, "Session task panicked");
                    }
                }
                () = &mut shutdown => {
                    info!(live = self.matrix.registry.count(), "Shutting down listener");
                    break;
                }
            }
        }

        sessions.shutdown().await;
        Ok(())
    }

    /// Wait for an accept token, then for the next pending connection.
    async fn next_connection(&self) -> std::io::Result<(TcpStream, SocketAddr)> {
        self.throttle.wait().await;
        self.listener.accept().await
    }

    fn admit(&self, sessions: &mut JoinSet<()>, stream: TcpStream, addr: SocketAddr) {
        let registry = &self.matrix.registry;

        if registry.is_full() {
            warn!(%addr, capacity = registry.capacity(), "Room full - rejecting connection");
            metrics::record_connection("rejected");
            drop(stream);
            return;
        }

        let uid = self.matrix.uid_gen.next();
        let (session, mailbox) =
            Session::with_mailbox(uid, addr, self.matrix.limits.mailbox_capacity);

        // Another admission may have raced us to the last slot.
        if !registry.add(Arc::clone(&session)) {
            warn!(%addr, uid, "Room filled during admission - rejecting connection");
            metrics::record_connection("rejected");
            drop(stream);
            return;
        }

        if let Err(e) = stream.set_nodelay(true) {
            debug!(%addr, error = %e, "Failed to set TCP_NODELAY");
        }

        info!(%addr, uid, "Connection accepted");
        metrics::record_connection("accepted");

        let connection = Connection::new(
            session,
            mailbox,
            stream,
            Arc::clone(&self.matrix),
            Arc::clone(&self.dispatcher),
        );
        sessions.spawn(async move {
            connection.run().await;
            info!(%addr, uid, "Connection closed");
        });
    }
}
