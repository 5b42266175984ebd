//! Broadcast server for the Yo wire protocol.
//!
//! Accepts TCP connections and relays single-byte message codes: a valid
//! intent byte is echoed uppercase back to its sender (acknowledgement) and
//! fanned out lowercase to every other connected client. Invalid bytes are
//! logged and dropped.
//!
//! The server exists for integration tests and the TUI's simulation mode,
//! and doubles as a standalone binary via `main.rs`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use thiserror::Error;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream, tcp::OwnedWriteHalf},
    sync::{Mutex, mpsc},
};
use yowire_proto::Intent;

/// Capacity of each client's outbound byte queue.
const OUTBOUND_QUEUE_CAPACITY: usize = 64;

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket bind or accept failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connected peers, keyed by connection id.
type PeerMap = Arc<Mutex<HashMap<u64, mpsc::Sender<u8>>>>;

/// Broadcast server bound to a local address.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Bind to `addr` (use port 0 for an ephemeral port).
    ///
    /// # Errors
    ///
    /// - [`ServerError::Io`] if the bind fails
    pub async fn bind(addr: &str) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// Local address the server is bound to.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Io`] if the socket has no local address
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections and relay message codes until shut down.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Io`] if accepting a connection fails
    pub async fn run(self) -> Result<(), ServerError> {
        let peers: PeerMap = Arc::new(Mutex::new(HashMap::new()));
        let mut next_id: u64 = 0;

        loop {
            let (stream, addr) = self.listener.accept().await?;
            let peer_id = next_id;
            next_id += 1;

            tracing::debug!(peer_id, %addr, "client connected");

            let peers = Arc::clone(&peers);
            tokio::spawn(async move {
                handle_client(peer_id, stream, peers).await;
            });
        }
    }
}

/// Serve one client until its connection closes.
async fn handle_client(peer_id: u64, stream: TcpStream, peers: PeerMap) {
    let (mut reader, writer) = stream.into_split();

    let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    peers.lock().await.insert(peer_id, tx);

    let writer_task = tokio::spawn(write_outbound(writer, rx));

    loop {
        let byte = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(e) => {
                tracing::debug!(peer_id, error = %e, "client read ended");
                break;
            },
        };

        let Some(intent) = Intent::from_wire(byte) else {
            tracing::warn!(peer_id, byte, "dropping invalid message code");
            continue;
        };

        relay(peer_id, intent, &peers).await;
    }

    peers.lock().await.remove(&peer_id);
    writer_task.abort();
    tracing::debug!(peer_id, "client disconnected");
}

/// Echo the uppercase code to the sender and broadcast lowercase to others.
async fn relay(sender_id: u64, intent: Intent, peers: &PeerMap) {
    // Snapshot the peer set so the map is not held across sends.
    let targets: Vec<(u64, mpsc::Sender<u8>)> = {
        let peers = peers.lock().await;
        peers.iter().map(|(id, tx)| (*id, tx.clone())).collect()
    };

    for (peer_id, tx) in targets {
        let code = if peer_id == sender_id { intent.code() } else { intent.broadcast_code() };
        if tx.send(code).await.is_err() {
            tracing::debug!(peer_id, "peer queue closed during relay");
        }
    }
}

/// Drain a client's outbound queue onto its socket.
async fn write_outbound(mut writer: OwnedWriteHalf, mut rx: mpsc::Receiver<u8>) {
    while let Some(code) = rx.recv().await {
        if writer.write_u8(code).await.is_err() {
            return;
        }
        if writer.flush().await.is_err() {
            return;
        }
    }
}
