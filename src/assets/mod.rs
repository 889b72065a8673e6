//! Static asset providers
//!
//! The HTML surface can come from the compiled-in bundle or from the
//! on-disk htmlroot. Both sides implement `AssetSource`; the choice is
//! made once at startup and handlers never know the difference.

mod disk;
mod embedded;

pub use disk::DiskAssets;
pub use embedded::EmbeddedAssets;

use async_trait::async_trait;

/// A static asset: raw bytes plus the content type to serve them with
pub type Asset = (Vec<u8>, &'static str);

/// Source of static HTML assets
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Load the asset for a URL path, or `None` when it does not exist
    async fn load(&self, path: &str) -> Option<Asset>;

    /// Short human-readable description for the startup log
    fn describe(&self) -> String;
}
