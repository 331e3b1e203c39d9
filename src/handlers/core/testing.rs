//! Fixtures for handler unit tests.

use crate::config::LimitsConfig;
use crate::state::{Mailbox, Matrix, Session, Uid};
use chatroom_proto::{CommandLine, Input, Reply};
use std::net::SocketAddr;
use std::sync::Arc;

/// A matrix with one registered session per uid, plus their mailboxes.
pub struct Room {
    pub matrix: Arc<Matrix>,
    pub sessions: Vec<(Arc<Session>, Mailbox)>,
}

impl Room {
    pub fn with_uids(uids: &[Uid]) -> Self {
        let matrix = Arc::new(Matrix::new(&LimitsConfig::default()));
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let sessions = uids
            .iter()
            .map(|&uid| {
                let (session, rx) = Session::with_mailbox(uid, addr, 32);
                assert!(matrix.registry.add(Arc::clone(&session)));
                (session, rx)
            })
            .collect();
        Self { matrix, sessions }
    }

    pub fn session(&self, idx: usize) -> &Arc<Session> {
        &self.sessions[idx].0
    }

    /// Everything queued for session `idx` so far.
    pub fn drain(&mut self, idx: usize) -> Vec<Reply> {
        let rx = &mut self.sessions[idx].1;
        let mut out = Vec::new();
        while let Ok(reply) = rx.try_recv() {
            out.push((*reply).clone());
        }
        out
    }
}

/// Parse a command line, panicking if it is not one.
pub fn command(line: &str) -> CommandLine<'_> {
    match Input::parse(line) {
        Input::Command(cmd) => cmd,
        other => panic!("expected command line, got {other:?}"),
    }
}
