// Application state module
// Immutable per-process state shared by every connection

use crate::assets::{AssetSource, DiskAssets, EmbeddedAssets};

use super::types::ServerConfig;

/// Shared application state
///
/// The configuration is resolved once at startup and never mutated, so
/// handlers read it without any locking discipline.
pub struct AppState {
    pub config: ServerConfig,
    pub assets: Box<dyn AssetSource>,
}

impl AppState {
    /// Build the state, selecting the static-content provider
    pub fn new(config: ServerConfig) -> Self {
        let assets: Box<dyn AssetSource> = if config.use_embedded {
            Box::new(EmbeddedAssets)
        } else {
            Box::new(DiskAssets::new(
                config.html_root.clone(),
                config.http.index_files.clone(),
            ))
        };
        Self { config, assets }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::AppState;
    use crate::config::types::{HttpConfig, LoggingConfig, ServerConfig};
    use std::path::Path;

    /// Build an `AppState` rooted at a scratch directory, access log off
    pub fn state_with_dirs(base: &Path) -> AppState {
        let html_root = base.join("htmlroot");
        let upload_dir = base.join("upload");
        std::fs::create_dir_all(&html_root).unwrap();
        std::fs::create_dir_all(&upload_dir).unwrap();

        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            display_url: "http://127.0.0.1:8081".to_string(),
            base_dir: base.to_path_buf(),
            html_root,
            upload_dir,
            use_embedded: true,
            logging: LoggingConfig {
                access_log: false,
                ..LoggingConfig::default()
            },
            http: HttpConfig::default(),
        };
        AppState::new(config)
    }
}
