//! Observable connection state.

/// Connection state as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected to the server.
    #[default]
    Disconnected,
    /// Connection attempt in progress.
    Connecting,
    /// Connected; intents can be sent.
    Connected,
}
