//! Session notices delivered to the caller.

use yowire_proto::MessageEvent;

/// Why the receive loop terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// A local [`crate::Session::disconnect`] closed the handle. Any read
    /// error it provoked is suppressed; the caller already reported the
    /// disconnect.
    Local,

    /// The server closed the connection or the read failed. `None` when the
    /// stream ended without an error description.
    Remote(Option<String>),
}

/// Events the receive loop delivers to the caller.
///
/// The caller is responsible for rendering these into display lines and for
/// feeding classified events to the statistics engine. Exactly one consumer
/// reads the channel, so downstream state needs no locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// A classified message event (self-ack or peer broadcast).
    Event(MessageEvent),

    /// A byte outside the code alphabet. The loop keeps listening.
    InvalidCode(u8),

    /// The receive loop terminated; the session is gone.
    Closed(CloseReason),
}
