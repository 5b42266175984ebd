//! Wire codec for the Yo broadcast protocol.
//!
//! The protocol is a raw byte stream with no framing: every message is a
//! single ASCII code. Clients send uppercase intent codes to the server. The
//! server sends codes back according to the following:
//!
//! - Uppercase codes acknowledge messages we sent. The server echoes our own
//!   `Y`/`H` back once it has accepted the message.
//! - Lowercase codes are messages other clients sent.
//!
//! # Components
//!
//! - [`Intent`]: the two user intents a client can put on the wire
//! - [`MessageEvent`]: classified inbound events (self-ack vs peer broadcast)
//! - [`ProtocolError`]: invalid-code rejection (non-fatal by contract)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod code;
mod errors;

pub use code::{Intent, MessageEvent};
pub use errors::ProtocolError;
