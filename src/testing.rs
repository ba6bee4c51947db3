// src/testing.rs
// =============================================================================
// Local network fixtures for tests.
//
// Nothing here touches the internet: every server binds to 127.0.0.1 on a
// random port and runs on the test's tokio runtime.
// =============================================================================

use rustls::{Certificate, ClientConfig, PrivateKey, RootCertStore, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

// Self-signed leaf certificate for "localhost" (DNS SAN only, no IP SAN)
const LOCALHOST_CERT: &[u8] = include_bytes!("../tests/fixtures/localhost.cert.der");
const LOCALHOST_KEY: &[u8] = include_bytes!("../tests/fixtures/localhost.key.der");

// Serves a bodyless response with the given status code to every request
pub async fn spawn_http_server(code: u16) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {} Fixture\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    code
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

// Accepts connections and never answers
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

// TLS server presenting the "localhost" fixture certificate
pub async fn spawn_tls_server() -> SocketAddr {
    let config = ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(
            vec![Certificate(LOCALHOST_CERT.to_vec())],
            PrivateKey(LOCALHOST_KEY.to_vec()),
        )
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(stream) = acceptor.accept(socket).await {
                    // Keep the session open long enough for the client to finish
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    drop(stream);
                }
            });
        }
    });

    addr
}

// Client configuration that trusts only the fixture certificate
pub fn fixture_client_config() -> Arc<ClientConfig> {
    let mut roots = RootCertStore::empty();
    roots.add(&Certificate(LOCALHOST_CERT.to_vec())).unwrap();

    Arc::new(
        ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}

// An address nothing listens on (connections are refused)
pub async fn unused_local_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
