//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! dispatch, and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Instant;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Errors a request body can surface while being drained
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const UPLOAD_PATH: &str = "/upload";
pub const LISTING_PATH: &str = "/files";

impl AppState {
    /// Main entry point for HTTP request handling
    ///
    /// Generic over the body type so tests can drive handlers with
    /// in-memory bodies.
    pub async fn handle_request<B>(
        &self,
        req: Request<B>,
        remote_addr: SocketAddr,
    ) -> Result<Response<Full<Bytes>>, Infallible>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError> + Send + 'static,
    {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(ToString::to_string);
        let version = logger::http_version_label(req.version());
        let referer = header_string(&req, "referer");
        let user_agent = header_string(&req, "user-agent");

        let response = self.route(req).await;

        if self.config.logging.access_log {
            let mut entry = AccessLogEntry::new(remote_addr.to_string(), method, path);
            entry.query = query;
            entry.http_version = version.to_string();
            entry.status = response.status().as_u16();
            entry.body_bytes =
                usize::try_from(response.body().size_hint().exact().unwrap_or(0))
                    .unwrap_or(usize::MAX);
            entry.referer = referer;
            entry.user_agent = user_agent;
            entry.request_time_us =
                u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            logger::log_access(&entry, &self.config.logging.access_log_format);
        }

        Ok(response)
    }

    /// Dispatch a request to its handler by path and method
    async fn route<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError> + Send + 'static,
    {
        let path = req.uri().path().to_string();
        let method = req.method().clone();

        match (path.as_str(), &method) {
            (UPLOAD_PATH, &Method::POST) => {
                if let Some(resp) = self.check_form_size(&req) {
                    return resp;
                }
                self.handle_upload(req).await
            }
            (UPLOAD_PATH, &Method::OPTIONS) => http::build_options_response("POST, OPTIONS"),
            (UPLOAD_PATH, _) => http::build_405_response("POST, OPTIONS"),
            (LISTING_PATH, &Method::GET | &Method::POST) => self.handle_listing(),
            (LISTING_PATH, _) => http::build_405_response("GET, POST"),
            (_, &Method::GET | &Method::HEAD) => {
                let if_none_match = header_string(&req, "if-none-match");
                self.serve_static(&path, method == Method::HEAD, if_none_match.as_deref())
                    .await
            }
            (_, &Method::OPTIONS) => http::build_options_response("GET, HEAD, OPTIONS"),
            _ => {
                logger::log_warning(&format!("method not allowed: {method} {path}"));
                http::build_405_response("GET, HEAD, OPTIONS")
            }
        }
    }

    /// Reject oversized uploads early from the Content-Length header
    ///
    /// The multipart parser enforces the same cap on the actual stream;
    /// this avoids draining bodies that announce themselves too big.
    fn check_form_size<B>(&self, req: &Request<B>) -> Option<Response<Full<Bytes>>> {
        let declared = req
            .headers()
            .get("content-length")?
            .to_str()
            .ok()?
            .parse::<u64>()
            .ok()?;
        if declared > self.config.http.max_form_size {
            logger::log_warning(&format!(
                "upload rejected: declared body of {declared} bytes exceeds cap of {} bytes",
                self.config.http.max_form_size
            ));
            return Some(http::build_413_response());
        }
        None
    }
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::state_with_dirs;
    use http_body_util::BodyExt;

    fn remote() -> SocketAddr {
        "127.0.0.1:45678".parse().unwrap()
    }

    fn get(path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_embedded_form() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let resp = state.handle_request(get("/"), remote()).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8(body.to_vec())
            .unwrap()
            .contains("name=\"myFile\""));
    }

    #[tokio::test]
    async fn test_head_gets_headers_without_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = state.handle_request(req, remote()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().contains_key("Content-Length"));
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let resp = state.handle_request(get("/nope"), remote()).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_get_on_upload_is_405() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let resp = state
            .handle_request(get("/upload"), remote())
            .await
            .unwrap();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_oversized_declared_upload_is_413() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let req = Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header("content-length", (state.config.http.max_form_size + 1).to_string())
            .header("content-type", "multipart/form-data; boundary=x")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = state.handle_request(req, remote()).await.unwrap();
        assert_eq!(resp.status(), 413);
    }

    #[tokio::test]
    async fn test_options_on_root_is_204() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dirs(dir.path());

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = state.handle_request(req, remote()).await.unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }
}
