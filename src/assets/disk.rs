//! On-disk HTML root
//!
//! Serves files from the resolved htmlroot with index-file resolution
//! and a containment check against directory traversal.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::http::mime;
use crate::logger;

use super::{Asset, AssetSource};

/// Serves files from the configured htmlroot directory
///
/// The root must already be canonical; `ServerConfig::resolve`
/// guarantees that.
pub struct DiskAssets {
    root: PathBuf,
    index_files: Vec<String>,
}

impl DiskAssets {
    pub fn new(root: PathBuf, index_files: Vec<String>) -> Self {
        Self { root, index_files }
    }

    /// Map a URL path to a file under the root
    ///
    /// Returns `None` for misses and for paths escaping the root.
    fn locate(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        let mut file_path = self.root.join(relative);

        // Directory requests fall back to the first index file present
        if file_path.is_dir() || relative.is_empty() || relative.ends_with('/') {
            for index in &self.index_files {
                let candidate = file_path.join(index);
                if candidate.is_file() {
                    file_path = candidate;
                    break;
                }
            }
        }

        // Missing files are ordinary 404s, not worth a log line
        let canonical = file_path.canonicalize().ok()?;
        if !canonical.starts_with(&self.root) {
            logger::log_warning(&format!(
                "path traversal attempt blocked: {path} -> {}",
                canonical.display()
            ));
            return None;
        }
        Some(canonical)
    }
}

#[async_trait]
impl AssetSource for DiskAssets {
    async fn load(&self, path: &str) -> Option<Asset> {
        let file_path = self.locate(path)?;
        let content = match fs::read(&file_path).await {
            Ok(content) => content,
            Err(e) => {
                logger::log_error(&format!(
                    "failed to read '{}': {e}",
                    file_path.display()
                ));
                return None;
            }
        };
        let content_type = mime::content_type(file_path.extension().and_then(|e| e.to_str()));
        Some((content, content_type))
    }

    fn describe(&self) -> String {
        format!("on-disk htmlroot at {}", self.root.display())
    }
}
