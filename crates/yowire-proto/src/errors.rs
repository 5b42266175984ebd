//! Protocol error types.

use thiserror::Error;

/// Errors produced by the wire codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Byte value outside the four-code alphabet.
    ///
    /// Non-fatal: the receive loop reports it and keeps listening.
    #[error("invalid message code: {0:#04x}")]
    InvalidCode(u8),
}
