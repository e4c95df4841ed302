use thiserror::Error;

/// Errors produced when parsing the text form of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    message: String,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message.push_str("unexpected input");
        }
        Self { message, offset }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset into the input where parsing stopped.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
