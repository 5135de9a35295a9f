use crate::server::ServerContext;
use crate::session::Session;
use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Binds the control port from the configuration and serves forever.
pub async fn start_server(context: Arc<ServerContext>) -> Result<()> {
    let address = SocketAddr::new(
        context.config.server.listen_address,
        context.config.server.listen_port,
    );
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, context).await
}

/// Accepts control connections, one task per session.
pub async fn serve(listener: TcpListener, context: Arc<ServerContext>) -> Result<()> {
    loop {
        let (socket, addr) = listener
            .accept()
            .await
            .context("Failed to accept control connection")?;
        info!("New connection from {}", addr);

        let session = Session::new(socket, Arc::clone(&context));
        tokio::spawn(async move {
            session.run().await;
            info!("Connection closed for {}", addr);
        });
    }
}
