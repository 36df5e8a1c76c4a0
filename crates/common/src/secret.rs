//! Redacting wrapper for bearer tokens
//!
//! Access and refresh tokens travel through config, client structs, and
//! error paths; wrapping them keeps derived `Debug` output and tracing
//! fields from leaking the token text. The inner string is zeroized when
//! the wrapper is dropped.

use std::fmt;
use zeroize::Zeroize;

/// A bearer token value, redacted in Debug/Display output.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the token text, e.g. to build an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_redact() {
        let token = Secret::new("eyJhbGciOi.payload.sig");
        assert_eq!(format!("{:?}", token), "[REDACTED]");
        assert_eq!(format!("{}", token), "[REDACTED]");
    }

    #[test]
    fn expose_returns_inner_value() {
        let token = Secret::new("my-bearer-token");
        assert_eq!(token.expose(), "my-bearer-token");
    }

    #[test]
    fn from_string_round_trips() {
        let token: Secret = String::from("abc").into();
        assert_eq!(token.expose(), "abc");
    }
}
