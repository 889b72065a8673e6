// Configuration types module
// The resolved server configuration, immutable after startup

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use super::cli::Cli;

/// Subdirectory of the base dir served in on-disk HTML mode
pub const HTML_ROOT_SUBDIR: &str = "htmlroot";
/// Subdirectory of the base dir where uploads are persisted
pub const UPLOAD_SUBDIR: &str = "upload";

/// Cap on the whole multipart stream, in bytes
const MAX_FORM_SIZE: u64 = 10 * 1024 * 1024;

/// Resolved server configuration
///
/// Built once at startup from CLI flags. Every path is absolute with
/// symlinks resolved, and the referenced directories exist. Handlers
/// only ever see this through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Human-facing URL shown in logs; substitutes the loopback host
    /// when binding all interfaces
    pub display_url: String,
    pub base_dir: PathBuf,
    pub html_root: PathBuf,
    pub upload_dir: PathBuf,
    pub use_embedded: bool,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-stream cap for parsed multipart forms, in bytes
    pub max_form_size: u64,
    /// Files tried when a directory path is requested
    pub index_files: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_form_size: MAX_FORM_SIZE,
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
        }
    }
}

impl ServerConfig {
    /// Resolve CLI flags into absolute paths and a bindable address
    pub fn resolve(cli: &Cli) -> std::io::Result<Self> {
        let base_dir = resolve_dir(Path::new(&cli.base))?;
        let html_root = resolve_dir(&base_dir.join(HTML_ROOT_SUBDIR))?;
        let upload_dir = resolve_dir(&base_dir.join(UPLOAD_SUBDIR))?;
        let (listen_addr, display_url) = parse_listen_addr(&cli.listen)?;

        Ok(Self {
            listen_addr,
            display_url,
            base_dir,
            html_root,
            upload_dir,
            use_embedded: !cli.no_embed,
            logging: LoggingConfig::default(),
            http: HttpConfig::default(),
        })
    }
}

/// Create a directory if absent and return its canonical absolute path
fn resolve_dir(path: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    path.canonicalize()
}

/// Parse a listen flag into a bindable address and a display URL.
///
/// Accepts `host:port`, `:port`, and a bare `port`. An empty or
/// `0.0.0.0` host binds all interfaces while the display URL substitutes
/// the loopback address so the logged link is reachable. Port 80 is
/// elided from the URL.
fn parse_listen_addr(listen: &str) -> std::io::Result<(SocketAddr, String)> {
    let (host, port) = match listen.rsplit_once(':') {
        Some((host, port)) => (host, port),
        None => ("", listen),
    };

    let port: u16 = port.parse().map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid port in listen address '{listen}'"),
        )
    })?;

    let bind_host = if host.is_empty() { "0.0.0.0" } else { host };
    let addr = (bind_host, port).to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("listen address '{listen}' did not resolve"),
        )
    })?;

    let display_host = if host.is_empty() || host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        host
    };
    let display_url = if port == 80 {
        format!("http://{display_host}")
    } else {
        format!("http://{display_host}:{port}")
    };

    Ok((addr, display_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_only_forms() {
        let (addr, url) = parse_listen_addr(":8081").unwrap();
        assert_eq!(addr.port(), 8081);
        assert!(addr.ip().is_unspecified());
        assert_eq!(url, "http://127.0.0.1:8081");

        let (addr, url) = parse_listen_addr("9090").unwrap();
        assert_eq!(addr.port(), 9090);
        assert_eq!(url, "http://127.0.0.1:9090");
    }

    #[test]
    fn test_parse_explicit_host() {
        let (addr, url) = parse_listen_addr("127.0.0.1:9090").unwrap();
        assert_eq!(addr, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(url, "http://127.0.0.1:9090");
    }

    #[test]
    fn test_parse_wildcard_host_displays_loopback() {
        let (addr, url) = parse_listen_addr("0.0.0.0:8081").unwrap();
        assert!(addr.ip().is_unspecified());
        assert_eq!(url, "http://127.0.0.1:8081");
    }

    #[test]
    fn test_port_80_elided_from_url() {
        let (_, url) = parse_listen_addr("10.0.0.1:80").unwrap();
        assert_eq!(url, "http://10.0.0.1");
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(parse_listen_addr(":notaport").is_err());
        assert!(parse_listen_addr("").is_err());
    }

    #[test]
    fn test_resolve_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            listen: ":8081".to_string(),
            base: dir.path().join("srv").to_string_lossy().into_owned(),
            no_embed: false,
        };
        let cfg = ServerConfig::resolve(&cli).unwrap();
        assert!(cfg.base_dir.is_dir());
        assert!(cfg.html_root.ends_with(HTML_ROOT_SUBDIR));
        assert!(cfg.html_root.is_dir());
        assert!(cfg.upload_dir.ends_with(UPLOAD_SUBDIR));
        assert!(cfg.upload_dir.is_dir());
        assert!(cfg.use_embedded);
    }

    #[test]
    fn test_resolve_fails_on_unusable_base() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let cli = Cli {
            listen: ":8081".to_string(),
            base: blocker.join("sub").to_string_lossy().into_owned(),
            no_embed: false,
        };
        assert!(ServerConfig::resolve(&cli).is_err());
    }
}
