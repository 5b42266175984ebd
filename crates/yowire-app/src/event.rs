//! Application input events.
//!
//! Events originate from two sources: user interaction (keys, resize, ticks)
//! and the session lifecycle (connect progress, send failures, receive-loop
//! notices).

use yowire_client::SessionNotice;

use crate::input::KeyInput;

/// Events processed by the [`crate::App`] state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection attempt started.
    Connecting,

    /// Connection established.
    Connected,

    /// Connection attempt failed.
    ConnectFailed {
        /// Failure description.
        cause: String,
    },

    /// Outbound send failed. The session stays connected.
    SendFailed {
        /// Failure description.
        cause: String,
    },

    /// Notice from the session's receive loop.
    Session(SessionNotice),
}
