//! Integration tests for the broadcast server.
//!
//! Raw TCP streams keep full control over the bytes on the wire. Clients
//! register by completing one echo round trip before the assertions that
//! depend on them being visible to the relay.

use std::time::Duration;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::timeout,
};
use yowire_server::Server;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

async fn start_server() -> String {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    addr
}

async fn read_byte(stream: &mut TcpStream) -> u8 {
    timeout(RECV_TIMEOUT, stream.read_u8()).await.expect("read timed out").unwrap()
}

/// Connect and complete one echo round trip so the peer is registered.
async fn connect_registered(addr: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_u8(b'H').await.unwrap();
    assert_eq!(read_byte(&mut stream).await, b'H');
    stream
}

#[tokio::test]
async fn sender_receives_uppercase_echo() {
    let addr = start_server().await;
    let mut alice = TcpStream::connect(&addr).await.unwrap();

    alice.write_u8(b'Y').await.unwrap();
    assert_eq!(read_byte(&mut alice).await, b'Y');
}

#[tokio::test]
async fn peers_receive_lowercase_broadcast() {
    let addr = start_server().await;
    let mut alice = connect_registered(&addr).await;
    let mut bob = connect_registered(&addr).await;

    // Alice saw Bob's registration Howdy as a broadcast.
    assert_eq!(read_byte(&mut alice).await, b'h');

    alice.write_u8(b'Y').await.unwrap();
    assert_eq!(read_byte(&mut alice).await, b'Y');
    assert_eq!(read_byte(&mut bob).await, b'y');
}

#[tokio::test]
async fn invalid_bytes_are_dropped() {
    let addr = start_server().await;
    let mut alice = TcpStream::connect(&addr).await.unwrap();

    alice.write_all(b"XzY").await.unwrap();

    // Only the valid Yo comes back; the junk produced no echo.
    assert_eq!(read_byte(&mut alice).await, b'Y');
}

#[tokio::test]
async fn lowercase_codes_from_clients_are_rejected() {
    let addr = start_server().await;
    let mut alice = TcpStream::connect(&addr).await.unwrap();

    // Clients may only send uppercase intents.
    alice.write_all(b"yhY").await.unwrap();
    assert_eq!(read_byte(&mut alice).await, b'Y');
}

#[tokio::test]
async fn disconnected_peer_is_unregistered() {
    let addr = start_server().await;
    let mut alice = connect_registered(&addr).await;
    let bob = connect_registered(&addr).await;
    assert_eq!(read_byte(&mut alice).await, b'h');

    drop(bob);

    // Relay still works for the remaining client.
    alice.write_u8(b'Y').await.unwrap();
    assert_eq!(read_byte(&mut alice).await, b'Y');
}
