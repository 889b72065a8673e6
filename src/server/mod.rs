// Server module entry point
// Listener construction and the accept loop

pub mod connection;
pub mod listener;

pub use listener::create_listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Accept connections until the process exits
///
/// One spawned task per connection; accept errors are logged and the
/// loop keeps serving.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => connection::accept_connection(stream, peer_addr, &state),
            Err(e) => logger::log_error(&format!("failed to accept connection: {e}")),
        }
    }
}
