//! Connection - Handles an individual client session.
//!
//! Each Connection runs in its own Tokio task and owns the read half of the
//! socket. The write half belongs to a writer task that drains the session
//! mailbox, so the socket is only ever written from one place:
//!
//! ```text
//!   FramedRead ──▶ Input::parse ──▶ Dispatcher / chat relay
//!                                        │
//!        other sessions ──try_send──▶ [Mailbox] ──▶ writer task ──▶ FramedWrite
//! ```
//!
//! Lifecycle: Joining (announce, topic, help hint) → Active (read loop) →
//! Leaving (unregister, announce, flush the mailbox, close).

use crate::handlers::{Context, Dispatcher, HandlerError, broadcast_chat};
use crate::metrics;
use crate::state::{Mailbox, Matrix, Session};
use crate::telemetry::spans;
use chatroom_proto::{Input, LineCodec, Reply};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

/// Upper bound on flushing queued lines once a session is leaving.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// A client session task.
pub struct Connection {
    session: Arc<Session>,
    mailbox: Mailbox,
    stream: TcpStream,
    matrix: Arc<Matrix>,
    dispatcher: Arc<Dispatcher>,
}

impl Connection {
    /// Create a connection for a session already admitted to the registry.
    pub fn new(
        session: Arc<Session>,
        mailbox: Mailbox,
        stream: TcpStream,
        matrix: Arc<Matrix>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            session,
            mailbox,
            stream,
            matrix,
            dispatcher,
        }
    }

    /// Run the session to completion.
    ///
    /// Per-session failures never escape: they end this session only.
    pub async fn run(self) {
        let span = spans::connection(self.session.uid(), &self.session.addr());
        self.run_session().instrument(span).await;
    }

    async fn run_session(self) {
        let Self {
            session,
            mailbox,
            stream,
            matrix,
            dispatcher,
        } = self;

        let (read_half, write_half) = stream.into_split();
        let cancel = CancellationToken::new();
        let writer = tokio::spawn(
            write_loop(
                mailbox,
                FramedWrite::new(write_half, LineCodec::new()),
                cancel.clone(),
            )
            .in_current_span(),
        );

        join(&session, &matrix).await;

        let mut lines = FramedRead::new(read_half, LineCodec::new());
        read_loop(&mut lines, &session, &matrix, &dispatcher).await;

        // Leaving
        let name = session.name();
        matrix.registry.remove(session.uid());
        matrix.registry.send_to_all(Reply::Left { name: name.clone() });
        metrics::session_left();
        info!(name = %name, "Client left");

        cancel.cancel();
        if let Err(e) = writer.await {
            warn!(error = %e, "Writer task failed");
        }
    }
}

/// Joining: announce to everyone, then greet the newcomer.
async fn join(session: &Arc<Session>, matrix: &Matrix) {
    metrics::session_joined();
    let name = session.name();
    info!(name = %name, "Client joined");

    matrix.registry.send_to_all(Reply::Joined { name });

    let topic = matrix.topic.get();
    if !topic.is_empty()
        && let Err(e) = session.send(Reply::Topic { topic }).await
    {
        debug!(error = %e, "Failed to send topic");
    }
    if let Err(e) = session.send(Reply::HelpHint).await {
        debug!(error = %e, "Failed to send help hint");
    }
}

/// Active: one line at a time until quit, EOF or a read error.
async fn read_loop(
    lines: &mut FramedRead<OwnedReadHalf, LineCodec>,
    session: &Arc<Session>,
    matrix: &Arc<Matrix>,
    dispatcher: &Dispatcher,
) {
    loop {
        let line = match lines.next().await {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                debug!(error = %e, "Read error");
                return;
            }
            None => {
                debug!("Client closed connection");
                return;
            }
        };

        match Input::parse(&line) {
            Input::Empty => {}
            Input::Chat(text) => {
                broadcast_chat(session, matrix, text);
            }
            Input::Command(cmd) => {
                let mut ctx = Context::new(session, matrix);
                let Err(error) = dispatcher.dispatch(&mut ctx, &cmd).await else {
                    continue;
                };

                match error.to_reply() {
                    Some(reply) => {
                        if let Err(e) = session.send(reply).await {
                            debug!(error = %e, "Failed to send usage error");
                            return;
                        }
                    }
                    None => {
                        if !matches!(error, HandlerError::Quit) {
                            warn!(error = %error, "Ending session");
                        }
                        return;
                    }
                }
            }
        }
    }
}

/// Writer task: drain the mailbox onto the socket.
///
/// On cancellation the mailbox is closed and whatever is already queued is
/// flushed before the socket is shut down.
async fn write_loop(
    mut mailbox: Mailbox,
    mut writer: FramedWrite<OwnedWriteHalf, LineCodec>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            reply = mailbox.recv() => match reply {
                Some(reply) => {
                    if let Err(e) = writer.send(&*reply).await {
                        debug!(error = %e, "Write failed");
                        return;
                    }
                }
                None => break,
            },
            () = cancel.cancelled() => {
                mailbox.close();
                let drain = async {
                    while let Some(reply) = mailbox.recv().await {
                        writer.send(&*reply).await?;
                    }
                    Ok::<_, chatroom_proto::ProtocolError>(())
                };
                match tokio::time::timeout(DRAIN_TIMEOUT, drain).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => debug!(error = %e, "Write failed while draining"),
                    Err(_) => debug!("Timed out draining mailbox"),
                }
                break;
            }
        }
    }

    if let Err(e) = writer.close().await {
        debug!(error = %e, "Failed to close connection");
    }
}
