//! Test chat client.
//!
//! Line-oriented client for integration testing that can send lines and
//! assert on what the server writes back.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// The last line of every join greeting.
pub const HELP_HINT: &str = "<< see /help for assistance";

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer,
        })
    }

    /// Send one line, appending CRLF.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line without its terminator.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(RECV_TIMEOUT).await
    }

    /// Receive one line with a custom timeout. EOF is an error.
    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines up to and including the join help hint.
    pub async fn recv_greeting(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_line().await?;
            let done = line == HELP_HINT;
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Receive `count` lines.
    pub async fn recv_lines(&mut self, count: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            lines.push(self.recv_line().await?);
        }
        Ok(lines)
    }

    /// Assert the next line equals `expected`.
    pub async fn expect_line(&mut self, expected: &str) {
        match self.recv_line().await {
            Ok(line) => assert_eq!(line, expected),
            Err(e) => panic!("expected {expected:?}, got error: {e}"),
        }
    }

    /// Assert nothing arrives within `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) {
        if let Ok(line) = self.recv_line_timeout(dur).await {
            panic!("expected silence, got {line:?}");
        }
    }

    /// Assert the server closes the connection without sending anything.
    pub async fn expect_closed(&mut self) {
        let mut line = String::new();
        match timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await {
            Ok(Ok(0)) => {}
            // A reset counts as closed.
            Ok(Err(_)) => {}
            Ok(Ok(_)) => panic!("expected close, got {line:?}"),
            Err(_) => panic!("connection still open"),
        }
    }
}
