// ============================
// docgate-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Directory of documents to serve
    pub document_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Credential refresh interval in seconds
    pub refresh_interval_secs: u64,
    /// Credential source; absent means the server runs unprotected
    pub source: Option<SourceSettings>,
}

/// Where the valid-password list lives.
///
/// The password and expiry columns are fetched independently per refresh;
/// row alignment between them is positional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Spreadsheet identifier
    pub spreadsheet: String,
    /// Worksheet (tab) name within the spreadsheet
    pub worksheet: String,
    /// Column holding passwords
    pub password_column: String,
    /// Column holding expiry dates (YYYY-MM-DD)
    pub expiry_column: String,
    /// API key for the sheets endpoint
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("static addr"),
            document_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            refresh_interval_secs: 60 * 5,
            source: None,
        }
    }
}

impl Settings {
    /// Load settings from `docgate.toml` and `DOCGATE_`-prefixed environment
    /// variables, on top of the defaults.
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("docgate.toml"))
            .merge(Env::prefixed("DOCGATE_").split("__"))
            .extract()?;

        Ok(settings)
    }
}
