//! Static file serving
//!
//! Thin layer over the configured `AssetSource`: conditional requests,
//! HEAD handling, and response assembly.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::http::{self, cache, response};

impl AppState {
    /// `GET|HEAD /*`: serve from the configured asset source
    pub async fn serve_static(
        &self,
        path: &str,
        is_head: bool,
        if_none_match: Option<&str>,
    ) -> Response<Full<Bytes>> {
        match self.assets.load(path).await {
            Some((content, content_type)) => {
                let etag = cache::generate_etag(&content);
                if cache::check_etag_match(if_none_match, &etag) {
                    return response::build_304_response(&etag);
                }
                response::build_cached_response(
                    Bytes::from(content),
                    content_type,
                    &etag,
                    is_head,
                )
            }
            None => http::build_404_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_support::state_with_dirs;

    #[tokio::test]
    async fn test_etag_match_returns_304() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let first = state.serve_static("/", false, None).await;
        assert_eq!(first.status(), 200);
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let second = state.serve_static("/", false, Some(&etag)).await;
        assert_eq!(second.status(), 304);
        assert_eq!(second.headers()["ETag"].to_str().unwrap(), etag);
    }

    #[tokio::test]
    async fn test_miss_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());
        let resp = state.serve_static("/missing.css", false, None).await;
        assert_eq!(resp.status(), 404);
    }
}
