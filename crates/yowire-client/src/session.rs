//! Session state machine and TCP transport.
//!
//! # State Machine
//!
//! ```text
//! ┌──────────────┐ connect ┌───────────┐ disconnect ┌─────────┐
//! │ Disconnected │────────>│ Connected │───────────>│ Closing │──┐
//! └──────────────┘         └───────────┘            └─────────┘  │
//!        ^                       │ read failure                  │
//!        └───────────────────────┴───────────────────────────────┘
//! ```
//!
//! A session is terminal: once closed it never reopens. Reconnecting means
//! creating a new session.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
    task::AbortHandle,
};
use yowire_proto::{Intent, MessageEvent, ProtocolError};

use crate::{
    error::{ConnectError, SendError},
    event::{CloseReason, SessionNotice},
};

/// Capacity of the notice channel between the receive loop and the caller.
const NOTICE_CHANNEL_CAPACITY: usize = 32;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection established; sends and the receive loop are active.
    Connected,
    /// Local disconnect in progress.
    Closing,
    /// Terminal state; the handle has been released.
    Disconnected,
}

/// A live connection to the Yo server.
///
/// Owns the write half of the TCP stream exclusively. The read half lives in
/// a spawned receive-loop task (at most one per session) that delivers
/// [`SessionNotice`]s through the channel returned by [`Session::connect`].
///
/// # Concurrency
///
/// The write path (this object) and the read path (the spawned task) are
/// independently owned; the only shared mutable state is the local-close
/// flag. [`Session::disconnect`] stores the flag before releasing the handle
/// so a concurrently blocked read observes the local close and suppresses
/// its error report.
pub struct Session {
    state: SessionState,
    writer: OwnedWriteHalf,
    closed_locally: Arc<AtomicBool>,
    recv_task: AbortHandle,
}

impl Session {
    /// Connect to the Yo server at `addr`.
    ///
    /// A single connect attempt with no retry; retry policy belongs to the
    /// caller. On success the session is `Connected`, its receive loop is
    /// running, and the returned channel yields notices until the session
    /// closes. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`ConnectError::Io`] if the TCP connect fails. No session is
    ///   created and no state is left behind.
    pub async fn connect(addr: &str) -> Result<(Self, mpsc::Receiver<SessionNotice>), ConnectError> {
        let stream = TcpStream::connect(addr).await?;
        let (reader, writer) = stream.into_split();

        let closed_locally = Arc::new(AtomicBool::new(false));
        let (notice_tx, notice_rx) = mpsc::channel(NOTICE_CHANNEL_CAPACITY);

        let recv_task = tokio::spawn(receive_loop(reader, notice_tx, Arc::clone(&closed_locally)))
            .abort_handle();

        tracing::debug!(addr, "connected to Yo server");

        let session = Self { state: SessionState::Connected, writer, closed_locally, recv_task };
        Ok((session, notice_rx))
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether outbound sends are currently valid.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Send one intent code to the server.
    ///
    /// Writes the encoded byte and flushes; the write either completes or
    /// fails as a unit, with no partial-write retry. Failure leaves the
    /// session `Connected` since the fault may be transient.
    ///
    /// No self-event is synthesized here. Self-sent accounting is driven by
    /// the server's uppercase echo arriving through the receive loop, so a
    /// send whose echo is lost never skews the statistics.
    ///
    /// # Errors
    ///
    /// - [`SendError::NotConnected`] outside the `Connected` state
    /// - [`SendError::Io`] if the write or flush fails
    pub async fn send_intent(&mut self, intent: Intent) -> Result<(), SendError> {
        if self.state != SessionState::Connected {
            return Err(SendError::NotConnected);
        }

        self.writer.write_u8(intent.code()).await?;
        self.writer.flush().await?;

        tracing::debug!(?intent, "sent intent");
        Ok(())
    }

    /// Close the connection.
    ///
    /// Idempotent: closing an already closed session is a no-op. The
    /// local-close flag is stored before the handle is released so the
    /// receive loop classifies the resulting read failure as a local close,
    /// then the receive task is aborted so a blocked read ends promptly.
    pub async fn disconnect(&mut self) {
        if self.state != SessionState::Connected {
            return;
        }
        self.state = SessionState::Closing;

        // Must be visible to the receive loop before the read can fail.
        self.closed_locally.store(true, Ordering::SeqCst);

        if let Err(e) = self.writer.shutdown().await {
            tracing::debug!(error = %e, "shutdown during disconnect");
        }
        self.recv_task.abort();

        self.state = SessionState::Disconnected;
        tracing::debug!("disconnected from Yo server");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // A dropped session must not leave the receive loop reading.
        self.closed_locally.store(true, Ordering::SeqCst);
        self.recv_task.abort();
    }
}

/// Receive loop: blocking one-byte reads until the connection terminates.
///
/// Runs as a spawned task. Invalid codes are reported and skipped; the loop
/// only terminates on read failure or when the notice receiver goes away.
async fn receive_loop(
    mut reader: OwnedReadHalf,
    notices: mpsc::Sender<SessionNotice>,
    closed_locally: Arc<AtomicBool>,
) {
    loop {
        let byte = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(e) => {
                let reason = if closed_locally.load(Ordering::SeqCst) {
                    CloseReason::Local
                } else if e.kind() == std::io::ErrorKind::UnexpectedEof {
                    // Stream ended without an error description.
                    CloseReason::Remote(None)
                } else {
                    CloseReason::Remote(Some(e.to_string()))
                };

                tracing::debug!(?reason, "receive loop terminated");
                let _ = notices.send(SessionNotice::Closed(reason)).await;
                return;
            },
        };

        let notice = match MessageEvent::decode(byte) {
            Ok(event) => SessionNotice::Event(event),
            Err(ProtocolError::InvalidCode(code)) => SessionNotice::InvalidCode(code),
        };

        if notices.send(notice).await.is_err() {
            // Caller went away; nothing left to deliver to.
            return;
        }
    }
}
