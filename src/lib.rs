//! tinyserve - minimal HTTP/1.1 file and echo server
//!
//! Core library: request parsing, routing, response building and gzip
//! compression, plus the connection loop that ties them to a socket.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
