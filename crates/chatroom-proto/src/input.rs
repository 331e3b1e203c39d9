//! Classification and tokenizing of inbound client lines.

use crate::limits::COMMAND_MARKER;

/// One inbound line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Nothing but whitespace; ignored by the server.
    Empty,
    /// Plain chat text, forwarded as received.
    Chat(&'a str),
    /// A line whose first byte is the command marker.
    Command(CommandLine<'a>),
}

impl<'a> Input<'a> {
    /// Classify a line that has already had its terminator removed.
    ///
    /// Whitespace only matters for spotting empty lines: the marker must be
    /// the first character, and chat text keeps its spacing.
    pub fn parse(line: &'a str) -> Self {
        if line.trim().is_empty() {
            Input::Empty
        } else if line.starts_with(COMMAND_MARKER) {
            Input::Command(CommandLine::parse(line))
        } else {
            Input::Chat(line)
        }
    }
}

/// A command line split into its name and whitespace-separated arguments.
///
/// The name is the first token with the marker removed, so `"/"` and
/// `"/ quit"` both produce an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// Command name without the marker, case preserved.
    pub name: &'a str,
    /// Remaining tokens.
    pub args: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
    fn parse(line: &'a str) -> Self {
        let mut tokens = line.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        Self {
            name: first.strip_prefix(COMMAND_MARKER).unwrap_or(first),
            args: tokens.collect(),
        }
    }

    /// Argument at position `n`, if present.
    pub fn arg(&self, n: usize) -> Option<&'a str> {
        self.args.get(n).copied()
    }

    /// Arguments from position `n` onwards rejoined with single spaces.
    ///
    /// Returns `None` when there are no arguments at or after `n`.
    pub fn rest(&self, n: usize) -> Option<String> {
        match self.args.get(n..) {
            Some(tail) if !tail.is_empty() => Some(tail.join(" ")),
            _ => None,
        }
    }
}
