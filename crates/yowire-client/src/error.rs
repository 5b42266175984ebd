//! Session error taxonomy.
//!
//! Nothing here is fatal to the process: connect failures are reported and
//! left to the caller's retry policy, send failures leave the session
//! connected, and receive failures are delivered as close notices rather
//! than errors.

use thiserror::Error;

/// Connection establishment failure.
///
/// Fatal to the connect attempt only. The session performs a single attempt;
/// retrying is the caller's decision.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// TCP connect (or address resolution) failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outbound write failure.
#[derive(Debug, Error)]
pub enum SendError {
    /// Send attempted outside the `Connected` state.
    #[error("not connected")]
    NotConnected,

    /// Write or flush failed. The session stays connected; the fault may be
    /// transient.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
