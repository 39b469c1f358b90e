//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per receive, a fixed set
//! of recognised headers, `Content-Length` bodies only.
//!
//! # Architecture
//!
//! - **`header`**: Splits header lines and matches names against the allow-list
//! - **`parser`**: Parses an incoming request from a byte buffer
//! - **`request`**: Request representation (method, target, version, headers, body)
//! - **`response`**: Response representation with builder and wire serialization
//! - **`compress`**: Gzip compression of response bodies
//! - **`writer`**: Writes a serialized response to the client
//! - **`connection`**: The per-connection request-response state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Receive one request
//!        └──────┬──────┘
//!               │ Request (or parse error) received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, then compress if negotiated
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ back to Reading until the peer closes
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tinyserve::http::compress::GzipCompressor;
//! use tinyserve::http::connection::Connection;
//! use tinyserve::router::Router;
//! use tinyserve::store::DiskStore;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new(Some("/tmp".into()), Arc::new(DiskStore::new())));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, GzipCompressor::default(), 1500);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod compress;
pub mod connection;
pub mod header;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
