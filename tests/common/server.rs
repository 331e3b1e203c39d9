//! Test server management.
//!
//! Spawns and manages chatroomd instances for integration testing.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::time::Duration;
use tempfile::TempDir;

/// Log line printed once the listening socket is ready.
const READY_MARKER: &str = "Chat listener bound";

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    _config_dir: TempDir,
}

impl TestServer {
    /// Spawn a server with the default capacity.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_capacity(100).await
    }

    /// Spawn a server admitting at most `max_clients` sessions.
    pub async fn spawn_with_capacity(max_clients: usize) -> anyhow::Result<Self> {
        let port = free_port()?;
        let config_dir = tempfile::tempdir()?;
        let config_path = config_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[listen]
address = "127.0.0.1:{port}"

[limits]
max_clients = {max_clients}
accept_rate_per_second = 1000
accept_burst = 1000
"#
        );
        std::fs::write(&config_path, config_content)?;

        let mut child = Command::new(env!("CARGO_BIN_EXE_chatroomd"))
            .arg(&config_path)
            .env("RUST_LOG", "info")
            .env("NO_COLOR", "1")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let Some(stdout) = child.stdout.take() else {
            anyhow::bail!("server stdout not captured");
        };

        // Keep draining stdout for the life of the process so logging never blocks.
        let (ready_tx, ready_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut ready_tx = Some(ready_tx);
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if line.contains(READY_MARKER)
                    && let Some(tx) = ready_tx.take()
                {
                    let _ = tx.send(());
                }
            }
        });

        let server = Self {
            child,
            port,
            _config_dir: config_dir,
        };

        let ready = tokio::task::spawn_blocking(move || {
            ready_rx.recv_timeout(Duration::from_secs(10))
        })
        .await?;
        if ready.is_err() {
            anyhow::bail!("Server failed to start within 10 seconds");
        }

        Ok(server)
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client and consume its join greeting.
    pub async fn join(&self) -> anyhow::Result<super::client::TestClient> {
        let (client, _) = self.join_with_greeting().await?;
        Ok(client)
    }

    /// Connect a client, returning it together with its join greeting lines.
    pub async fn join_with_greeting(
        &self,
    ) -> anyhow::Result<(super::client::TestClient, Vec<String>)> {
        let mut client = super::client::TestClient::connect(&self.address()).await?;
        let greeting = client.recv_greeting().await?;
        Ok((client, greeting))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
