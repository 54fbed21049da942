mod file_config;

pub use file_config::{FileConfig, ListingsConfig};

use crate::listing_store::DeletePolicy;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub static_dir_path: Option<String>,
    pub delete_policy: DeletePolicy,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    /// 0 disables the metrics listener.
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub static_dir_path: Option<PathBuf>,
    pub delete_policy: DeletePolicy,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified via --db-path or in config file")
            })?;

        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let static_dir_path = file
            .static_dir_path
            .or_else(|| cli.static_dir_path.clone())
            .map(PathBuf::from);
        if let Some(dir) = &static_dir_path {
            if !dir.is_dir() {
                bail!("static_dir_path is not a directory: {:?}", dir);
            }
        }

        let listings = file.listings.unwrap_or_default();
        let delete_policy = match listings.delete_policy {
            Some(raw) => match DeletePolicy::from_str(&raw, true) {
                Ok(policy) => policy,
                Err(_) => bail!("Unknown delete_policy {:?}, expected reject or cascade", raw),
            },
            None => cli.delete_policy,
        };

        Ok(Self {
            db_path,
            port,
            metrics_port,
            logging_level,
            static_dir_path,
            delete_policy,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
