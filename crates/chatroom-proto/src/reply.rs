//! Outbound server lines.
//!
//! Every variant renders to one or more exact `\r\n`-terminated lines; clients
//! match on these literals, so the text must not drift.

use std::fmt;

/// The static command reference sent for `/help`.
pub const HELP_LINES: &[&str] = &[
    "/help     Show help",
    "/topic    <message> Set chat topic",
    "/nick     <name> Change nickname",
    "/msg      <reference> <message> Send private message",
    "/list     Show active clients",
    "/ping     Server test",
    "/quit     Quit chatroom",
];

/// A line (or block of lines) sent from the server to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `<< {name} has joined`
    Joined { name: String },
    /// `<< {name} has left`
    Left { name: String },
    /// `<< topic: {topic}`
    Topic { topic: String },
    /// `<< see /help for assistance`
    HelpHint,
    /// `[{name}] {text}`
    Chat { name: String, text: String },
    /// `<< {old} is now known as {new}`
    Renamed { old: String, new: String },
    /// `[PM][{sender}] {text}`
    Private { sender: String, text: String },
    /// `<< pong`
    Pong,
    /// `<< clients {count}` followed by `<< [{uid}] {name}` per client.
    ClientList { entries: Vec<(u64, String)> },
    /// The static command reference.
    Help,
    /// `<< message cannot be null`
    MessageCannotBeNull,
    /// `<< name cannot be null`
    NameCannotBeNull,
    /// `<< reference cannot be null`
    ReferenceCannotBeNull,
    /// `<< unknown command`
    UnknownCommand,
}

impl Reply {
    /// Static label used for logging and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Joined { .. } => "joined",
            Self::Left { .. } => "left",
            Self::Topic { .. } => "topic",
            Self::HelpHint => "help_hint",
            Self::Chat { .. } => "chat",
            Self::Renamed { .. } => "renamed",
            Self::Private { .. } => "private",
            Self::Pong => "pong",
            Self::ClientList { .. } => "client_list",
            Self::Help => "help",
            Self::MessageCannotBeNull => "message_cannot_be_null",
            Self::NameCannotBeNull => "name_cannot_be_null",
            Self::ReferenceCannotBeNull => "reference_cannot_be_null",
            Self::UnknownCommand => "unknown_command",
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined { name } => write!(f, "<< {name} has joined\r\n"),
            Self::Left { name } => write!(f, "<< {name} has left\r\n"),
            Self::Topic { topic } => write!(f, "<< topic: {topic}\r\n"),
            Self::HelpHint => f.write_str("<< see /help for assistance\r\n"),
            Self::Chat { name, text } => write!(f, "[{name}] {text}\r\n"),
            Self::Renamed { old, new } => write!(f, "<< {old} is now known as {new}\r\n"),
            Self::Private { sender, text } => write!(f, "[PM][{sender}] {text}\r\n"),
            Self::Pong => f.write_str("<< pong\r\n"),
            Self::ClientList { entries } => {
                write!(f, "<< clients {}\r\n", entries.len())?;
                for (uid, name) in entries {
                    write!(f, "<< [{uid}] {name}\r\n")?;
                }
                Ok(())
            }
            Self::Help => {
                for line in HELP_LINES {
                    write!(f, "<< {line}\r\n")?;
                }
                Ok(())
            }
            Self::MessageCannotBeNull => f.write_str("<< message cannot be null\r\n"),
            Self::NameCannotBeNull => f.write_str("<< name cannot be null\r\n"),
            Self::ReferenceCannotBeNull => f.write_str("<< reference cannot be null\r\n"),
            Self::UnknownCommand => f.write_str("<< unknown command\r\n"),
        }
    }
}
