//! Logger module
//!
//! Server lifecycle logging, access logging, and the error channel.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::ServerConfig;
use crate::handler::upload::StoredUpload;

/// Initialize log output targets; call once at startup
pub fn init(config: &ServerConfig) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(config: &ServerConfig) {
    write_info("======================================");
    write_info(&format!(
        "HTTP multipart upload server, version {}",
        env!("CARGO_PKG_VERSION")
    ));
    write_info(&format!(
        "static base directory: {}",
        config.base_dir.display()
    ));
    write_info(&format!(
        "HTML root directory: {}",
        config.html_root.display()
    ));
    write_info(&format!("upload directory: {}", config.upload_dir.display()));
    write_info(&format!("listen: {}", config.listen_addr));
    write_info(&format!("URL: {}", config.display_url));
    write_info("======================================\n");
}

pub fn log_assets_mode(description: &str) {
    write_info(&format!("serving HTML from {description}"));
}

/// Log a persisted upload with the client-reported metadata
pub fn log_upload_stored(upload: &StoredUpload) {
    write_info(&format!(
        "uploaded file: {} ({} bytes, {}) stored as {}",
        upload.client_name.as_deref().unwrap_or("(unnamed)"),
        upload.size,
        upload.content_type.as_deref().unwrap_or("unknown content type"),
        upload.path.display(),
    ));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] failed to serve connection: {err:?}"));
}

/// Log a formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

/// Short label for an HTTP version, as it appears in access logs
pub fn http_version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
