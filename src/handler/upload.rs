//! Upload handler
//!
//! Parses the multipart form, extracts the `myFile` field, and persists
//! it under a generated name in the upload directory. The client
//! filename is echoed back but never used for storage.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::{Request, Response, StatusCode};
use multer::{Constraints, Multipart, SizeLimit};
use std::io::Write;
use std::path::PathBuf;

use crate::config::AppState;
use crate::http;
use crate::logger;

use super::router::BoxError;

/// Form field holding the uploaded file
pub const UPLOAD_FIELD: &str = "myFile";

// Stored files are named `upload-<random>.png`; the random segment is
// what makes concurrent uploads collision-free.
const STORED_PREFIX: &str = "upload-";
const STORED_SUFFIX: &str = ".png";

/// A successfully persisted upload
#[derive(Debug)]
pub struct StoredUpload {
    /// Filename reported by the client; untrusted, display only
    pub client_name: Option<String>,
    /// Content type of the file part as sent by the client
    pub content_type: Option<String>,
    pub size: u64,
    pub path: PathBuf,
}

/// Failure modes of the upload pipeline, each with its own response
#[derive(Debug)]
pub enum UploadError {
    /// Request is not multipart or carries no usable boundary
    NotMultipart,
    /// The form parsed but contained no `myFile` field
    MissingField,
    /// The multipart stream was malformed
    Malformed(multer::Error),
    /// The form exceeded the configured size cap
    TooLarge,
    /// Reading the field bytes failed mid-stream
    Read(multer::Error),
    /// Creating, writing, or keeping the destination file failed
    Persist(std::io::Error),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotMultipart => write!(f, "request is not multipart/form-data"),
            Self::MissingField => write!(f, "form field '{UPLOAD_FIELD}' is missing"),
            Self::Malformed(e) => write!(f, "malformed multipart form: {e}"),
            Self::TooLarge => write!(f, "multipart form exceeds the size cap"),
            Self::Read(e) => write!(f, "reading the uploaded file failed: {e}"),
            Self::Persist(e) => write!(f, "writing the uploaded file failed: {e}"),
        }
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(e) | Self::Read(e) => Some(e),
            Self::Persist(e) => Some(e),
            _ => None,
        }
    }
}

impl UploadError {
    /// Status code and page title for this failure
    fn response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotMultipart | Self::Malformed(_) | Self::MissingField => {
                (StatusCode::BAD_REQUEST, "error retrieving the file")
            }
            Self::TooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "error retrieving the file"),
            Self::Read(_) => (StatusCode::BAD_REQUEST, "read file failed"),
            Self::Persist(_) => (StatusCode::INTERNAL_SERVER_ERROR, "write to disk failed"),
        }
    }
}

/// Sort a parser error into the failure mode it represents
fn classify(err: multer::Error) -> UploadError {
    match &err {
        multer::Error::StreamSizeExceeded { .. } | multer::Error::FieldSizeExceeded { .. } => {
            UploadError::TooLarge
        }
        multer::Error::StreamReadFailed(_) => UploadError::Read(err),
        _ => UploadError::Malformed(err),
    }
}

impl AppState {
    /// `POST /upload`: parse the form, persist the file, confirm to the client
    pub async fn handle_upload<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError> + Send + 'static,
    {
        match self.receive_upload(req).await {
            Ok(stored) => {
                logger::log_upload_stored(&stored);
                let stored_name = stored.path.file_name().map_or_else(
                    || stored.path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                let message = format!(
                    "uploaded file: {}\nfile size: {} bytes\ncontent type: {}\nstored as: {stored_name}",
                    stored.client_name.as_deref().unwrap_or("(unnamed)"),
                    stored.size,
                    stored.content_type.as_deref().unwrap_or("unknown"),
                );
                http::build_message_response(
                    StatusCode::OK,
                    "Successfully Uploaded File",
                    &message,
                )
            }
            Err(err) => {
                logger::log_error(&format!("upload failed: {err}"));
                let (status, title) = err.response_parts();
                http::build_message_response(status, title, &format!("upload failed: {err}"))
            }
        }
    }

    /// Run the multipart parse and persist the first `myFile` field
    async fn receive_upload<B>(&self, req: Request<B>) -> Result<StoredUpload, UploadError>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError> + Send + 'static,
    {
        let boundary = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|ct| multer::parse_boundary(ct).ok())
            .ok_or(UploadError::NotMultipart)?;

        let constraints = Constraints::new()
            .size_limit(SizeLimit::new().whole_stream(self.config.http.max_form_size));
        let stream = req.into_body().into_data_stream();
        let mut form = Multipart::with_constraints(stream, boundary, constraints);

        while let Some(field) = form.next_field().await.map_err(classify)? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }
            let client_name = field.file_name().map(ToString::to_string);
            let content_type = field.content_type().map(ToString::to_string);
            // A failure from here on is a read failure, not a malformed form
            let data = field.bytes().await.map_err(|e| match classify(e) {
                UploadError::Malformed(inner) => UploadError::Read(inner),
                other => other,
            })?;
            return self.persist(&data, client_name, content_type);
        }

        Err(UploadError::MissingField)
    }

    /// Write the bytes to a fresh uniquely-named file in the upload dir
    ///
    /// Creation is atomic, so concurrent uploads cannot collide; the
    /// file is kept in place once fully written.
    fn persist(
        &self,
        data: &[u8],
        client_name: Option<String>,
        content_type: Option<String>,
    ) -> Result<StoredUpload, UploadError> {
        let mut file = tempfile::Builder::new()
            .prefix(STORED_PREFIX)
            .suffix(STORED_SUFFIX)
            .tempfile_in(&self.config.upload_dir)
            .map_err(UploadError::Persist)?;
        file.write_all(data).map_err(UploadError::Persist)?;
        file.flush().map_err(UploadError::Persist)?;
        let (_, path) = file.keep().map_err(|e| UploadError::Persist(e.error))?;

        Ok(StoredUpload {
            client_name,
            content_type,
            size: data.len() as u64,
            path,
        })
    }
}
