//! Command-line interface definition
//!
//! All runtime configuration comes in through these flags; nothing is
//! read from the environment or from config files.

use clap::Parser;

const DEFAULT_LISTEN_ADDR: &str = ":8081";
const DEFAULT_BASE_DIR: &str = ".";

/// HTTP multipart upload server
#[derive(Parser, Debug)]
#[command(version, about = "HTTP multipart upload server")]
pub struct Cli {
    /// Listen address for the server (host:port, :port, or port)
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Base directory for served and uploaded files
    #[arg(short, long, default_value = DEFAULT_BASE_DIR)]
    pub base: String,

    /// Serve HTML from the on-disk htmlroot instead of the embedded pages
    #[arg(short = 'r', long = "no-embed")]
    pub no_embed: bool,
}
