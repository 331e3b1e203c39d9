//! Protocol limits and bounded string helpers.

/// Size of the server-side read buffer; the longest line a client can send.
pub const BUFFER_SZ: usize = 2048;

/// Maximum length of a display name, in bytes.
pub const NAME_MAX_LEN: usize = 31;

/// Maximum length of the room topic, in bytes.
pub const TOPIC_MAX_LEN: usize = BUFFER_SZ / 2;

/// Character that introduces a command line.
pub const COMMAND_MARKER: char = '/';

/// Truncate `s` to at most `max` bytes without splitting a UTF-8 sequence.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
