//! Message codes.
//!
//! A message code represents a Yo or a Howdy as a single ASCII byte. Encoding
//! and decoding are pure functions over that byte; the session layer decides
//! what to do with the result.

use crate::errors::ProtocolError;

/// User intents that can be put on the wire.
///
/// These are the only two encodable intents. The wire code is always the
/// uppercase ASCII letter; the server derives the lowercase broadcast variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Send a Yo to everyone.
    Yo,
    /// Send a Howdy to everyone.
    Howdy,
}

impl Intent {
    /// Wire code sent to the server (uppercase ASCII).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Intent::Yo => b'Y',
            Intent::Howdy => b'H',
        }
    }

    /// Wire code the server fans out to other clients (lowercase ASCII).
    #[must_use]
    pub fn broadcast_code(self) -> u8 {
        self.code().to_ascii_lowercase()
    }

    /// Parse an intent byte as received by the server.
    ///
    /// Only the uppercase intent codes are accepted; anything else (including
    /// the lowercase broadcast variants) yields `None`.
    #[must_use]
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            b'Y' => Some(Intent::Yo),
            b'H' => Some(Intent::Howdy),
            _ => None,
        }
    }
}

/// Classified inbound message event.
///
/// Produced once per wire byte by [`MessageEvent::decode`]. `Sent*` variants
/// are the server acknowledging our own messages; `Recv*` variants are
/// broadcasts from other clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEvent {
    /// We sent a Yo (uppercase echo, `'Y'`).
    SentYo,
    /// Someone else sent a Yo (`'y'`).
    RecvYo,
    /// We sent a Howdy (uppercase echo, `'H'`).
    SentHowdy,
    /// Someone else sent a Howdy (`'h'`).
    RecvHowdy,
}

impl MessageEvent {
    /// Classify one inbound wire byte.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::InvalidCode`] for any byte outside the four-code
    ///   alphabet. Invalid codes are a protocol violation but not fatal.
    pub fn decode(byte: u8) -> Result<Self, ProtocolError> {
        match byte {
            b'Y' => Ok(MessageEvent::SentYo),
            b'y' => Ok(MessageEvent::RecvYo),
            b'H' => Ok(MessageEvent::SentHowdy),
            b'h' => Ok(MessageEvent::RecvHowdy),
            other => Err(ProtocolError::InvalidCode(other)),
        }
    }

    /// The wire byte this event was decoded from.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            MessageEvent::SentYo => b'Y',
            MessageEvent::RecvYo => b'y',
            MessageEvent::SentHowdy => b'H',
            MessageEvent::RecvHowdy => b'h',
        }
    }

    /// Whether this event acknowledges one of our own messages.
    #[must_use]
    pub fn is_self(self) -> bool {
        matches!(self, MessageEvent::SentYo | MessageEvent::SentHowdy)
    }

    /// The intent carried by this event.
    #[must_use]
    pub fn intent(self) -> Intent {
        match self {
            MessageEvent::SentYo | MessageEvent::RecvYo => Intent::Yo,
            MessageEvent::SentHowdy | MessageEvent::RecvHowdy => Intent::Howdy,
        }
    }
}
