use super::RequestsLoggingLevel;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Port of the Prometheus listener, 0 to disable it.
    pub metrics_port: u16,
    /// Serve `/static` from this directory instead of the built-in stylesheet.
    pub static_dir_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 5000,
            metrics_port: 9091,
            static_dir_path: None,
        }
    }
}
