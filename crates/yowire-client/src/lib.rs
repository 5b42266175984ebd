//! Client session for the Yo broadcast protocol.
//!
//! Owns the connection lifecycle: a single TCP connect attempt, an exclusive
//! write path for outbound intent codes, a spawned receive loop that
//! classifies every inbound byte, and an idempotent disconnect that the
//! receive loop can distinguish from a remote close.
//!
//! # Architecture
//!
//! [`Session::connect`] returns the session plus a channel of
//! [`SessionNotice`]s. The caller consumes notices on its own event loop and
//! feeds them to the application layer; the session never touches
//! presentation or statistics state directly. This keeps all shared mutable
//! state on a single consumer while sends and reads proceed concurrently.
//!
//! Self-sent accounting is echo driven: [`Session::send_intent`] only puts
//! the byte on the wire, and the matching `Sent*` event surfaces when the
//! server's uppercase echo comes back through the receive loop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;
mod session;

pub use error::{ConnectError, SendError};
pub use event::{CloseReason, SessionNotice};
pub use session::{Session, SessionState};
pub use yowire_proto::{Intent, MessageEvent};
