// Configuration module entry point
// CLI flags, resolved paths, and shared application state

mod cli;
mod state;
mod types;

pub use cli::Cli;
pub use state::AppState;
pub use types::{HttpConfig, LoggingConfig, ServerConfig};

#[cfg(test)]
pub use state::test_support;
