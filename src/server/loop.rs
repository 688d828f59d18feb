// Server loop module
// Accepts connections and serves them strictly one after another

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections forever
///
/// The next connection is accepted only after the current one is done; others
/// wait in the listen backlog. Accept errors are logged and the loop goes on.
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => serve_connection(stream, peer_addr, &state).await,
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}
