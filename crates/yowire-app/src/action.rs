//! Application side-effects.
//!
//! Instructions produced by the [`crate::App`] state machine for the runtime
//! to execute.

use yowire_proto::Intent;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Establish a new session.
    Connect,

    /// Send an intent over the live session.
    SendIntent(Intent),

    /// Close the live session.
    Disconnect,
}
