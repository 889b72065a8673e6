use clap::Parser;
use std::sync::Arc;

mod assets;
mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = config::Cli::parse();

    // Path resolution failures indicate a broken deployment; bail out
    // before binding anything.
    let cfg = config::ServerConfig::resolve(&cli)?;

    logger::init(&cfg)?;
    logger::log_server_start(&cfg);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let listener = server::create_listener(cfg.listen_addr)?;
    let state = Arc::new(config::AppState::new(cfg));
    logger::log_assets_mode(&state.assets.describe());

    server::run(listener, state).await
}
