//! Terminal UI for the Yo broadcast client.
//!
//! Binds keyboard input to the core's intent entry points and renders the
//! display console. Without `--server` the runtime spawns an in-process
//! broadcast server on a loopback port and connects to it (simulation mode).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod runtime;
mod ui;
