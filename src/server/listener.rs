use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::compress::GzipCompressor;
use crate::http::connection::Connection;
use crate::router::Router;
use crate::store::DiskStore;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, cfg).await
}

/// Accepts connections on an already bound listener, one task per connection.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    match &cfg.files.directory {
        Some(dir) => info!(directory = %dir.display(), "Serving files"),
        None => info!("No --directory given, /files/ routes disabled"),
    }

    let router = Arc::new(Router::new(
        cfg.files.directory.clone(),
        Arc::new(DiskStore::new()),
    ));
    let compressor = GzipCompressor::from_config(&cfg.compression);
    let max_request_bytes = cfg.server.max_request_bytes;

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        let compressor = compressor.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, compressor, max_request_bytes);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            } else {
                tracing::debug!("Connection from {} closed", peer);
            }
        });
    }
}
