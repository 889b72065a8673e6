//! Upload listing handler
//!
//! Placeholder endpoint: reports that listing is not implemented. No
//! filesystem enumeration happens here.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http;

impl AppState {
    /// `GET|POST /files`: fixed not-implemented message
    pub fn handle_listing(&self) -> Response<Full<Bytes>> {
        http::build_message_response(
            StatusCode::NOT_IMPLEMENTED,
            "File listing failed",
            "file listing for uploads is not implemented yet",
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_support::state_with_dirs;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    #[tokio::test]
    async fn test_listing_is_a_fixed_not_implemented_page() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let resp = state.handle_listing();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8(body.to_vec())
            .unwrap()
            .contains("not implemented"));
    }
}
