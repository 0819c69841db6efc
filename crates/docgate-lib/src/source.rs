// ============================
// docgate-lib/src/source.rs
// ============================
//! The external credential source.
//!
//! The cache only ever talks to the [`CredentialSource`] trait; the concrete
//! implementation here speaks the Google Sheets `values.get` REST endpoint,
//! but a file or a database would do just as well.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::SourceSettings;

/// HTTP request timeout. Bounds the refresh fetch; a timeout is treated
/// identically to any other refresh failure.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Base URL for the sheets values endpoint
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Errors talking to the credential source. All of them are non-fatal at
/// refresh time: the cache keeps its last good set and retries next interval.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("credential source unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("unexpected credential source response: {0}")]
    BadResponse(String),
}

/// Yields the current raw cell values of one column, ordered by row.
///
/// Two independent calls are made per refresh, one for the password column
/// and one for the expiry column; row alignment between them is positional.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn fetch_column(&self, column: &str) -> Result<Vec<String>, SourceError>;
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Google-Sheets-backed credential source.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SheetSource {
    client: Client,
    spreadsheet: String,
    worksheet: String,
    api_key: String,
}

impl SheetSource {
    pub fn new(settings: &SourceSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            spreadsheet: settings.spreadsheet.clone(),
            worksheet: settings.worksheet.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl CredentialSource for SheetSource {
    async fn fetch_column(&self, column: &str) -> Result<Vec<String>, SourceError> {
        let url = format!(
            "{}/{}/values/{}!{}:{}",
            SHEETS_BASE_URL, self.spreadsheet, self.worksheet, column, column
        );

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("majorDimension", "COLUMNS")])
            .send()
            .await?
            .error_for_status()?;

        let range: ValueRange = response.json().await?;

        // majorDimension=COLUMNS yields one inner list per requested column;
        // we only ever ask for a single column.
        let cells = range.values.into_iter().next().unwrap_or_default();
        debug!(column, rows = cells.len(), "fetched credential column");
        Ok(cells)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory sources used by the unit tests across the crate.
    use std::collections::HashMap;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::{CredentialSource, SourceError};

    /// Source backed by fixed column data. Columns can be swapped at runtime
    /// to simulate the external store changing between refreshes.
    #[derive(Clone, Default)]
    pub struct StaticSource {
        columns: Arc<Mutex<HashMap<String, Vec<String>>>>,
    }

    impl StaticSource {
        pub fn new(columns: &[(&str, &[&str])]) -> Self {
            let source = Self::default();
            source.set_columns(columns);
            source
        }

        pub fn set_columns(&self, columns: &[(&str, &[&str])]) {
            let mut guard = self.columns.lock();
            guard.clear();
            for (name, cells) in columns {
                guard.insert(
                    (*name).to_string(),
                    cells.iter().map(|c| (*c).to_string()).collect(),
                );
            }
        }
    }

    #[async_trait::async_trait]
    impl CredentialSource for StaticSource {
        async fn fetch_column(&self, column: &str) -> Result<Vec<String>, SourceError> {
            Ok(self.columns.lock().get(column).cloned().unwrap_or_default())
        }
    }

    /// Source that always fails, for refresh-failure tests.
    pub struct FailingSource;

    #[async_trait::async_trait]
    impl CredentialSource for FailingSource {
        async fn fetch_column(&self, _column: &str) -> Result<Vec<String>, SourceError> {
            Err(SourceError::BadResponse("source offline".to_string()))
        }
    }
}
