// ============================
// docgate-lib/src/auth/cache.rs
// ============================
//! The periodically-refreshed credential cache.
//!
//! Owns the authoritative set of currently-valid passwords. A refresh builds
//! a complete replacement set off to the side and publishes it with a single
//! swap of the inner `Arc`; readers snapshot the `Arc` and never observe a
//! half-built set. No lock is held across the network fetch.
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use metrics::{counter, gauge};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::metrics::{CREDENTIALS_ACTIVE, CREDENTIALS_REFRESH_FAILED, CREDENTIALS_REFRESH_OK};
use crate::source::{CredentialSource, SourceError};

/// Rows reserved for headers/labels at the top of both columns; never
/// treated as password candidates.
const HEADER_ROWS: usize = 2;

/// Expiry cell date format
const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// Credential cache with atomic snapshot reads
#[derive(Clone)]
pub struct CredentialCache {
    source: Arc<dyn CredentialSource>,
    password_column: String,
    expiry_column: String,
    current: Arc<RwLock<Arc<Vec<String>>>>,
}

impl CredentialCache {
    /// Create an empty cache. Call [`CredentialCache::refresh`] once before
    /// serving so startup does not race an empty cache against requests.
    pub fn new(
        source: Arc<dyn CredentialSource>,
        password_column: String,
        expiry_column: String,
    ) -> Self {
        Self {
            source,
            password_column,
            expiry_column,
            current: Arc::new(RwLock::new(Arc::new(Vec::new()))),
        }
    }

    /// Snapshot of the latest successfully-built password set.
    ///
    /// Never blocks on an in-progress refresh; the returned `Arc` stays
    /// consistent for the whole operation of the caller.
    pub fn current(&self) -> Arc<Vec<String>> {
        self.current.read().clone()
    }

    /// Pull both columns from the source and swap in a freshly-built set.
    ///
    /// On failure the existing set is left untouched and the error returned;
    /// after the initial synchronous refresh these failures are non-fatal and
    /// self-heal on the next scheduled attempt.
    pub async fn refresh(&self) -> Result<(), SourceError> {
        let passwords = self.source.fetch_column(&self.password_column).await?;
        let expiries = self.source.fetch_column(&self.expiry_column).await?;

        let next = build_set(&passwords, &expiries, Local::now().naive_local());
        debug!(valid = next.len(), "credential refresh complete");
        counter!(CREDENTIALS_REFRESH_OK).increment(1);
        gauge!(CREDENTIALS_ACTIVE).set(next.len() as f64);

        *self.current.write() = Arc::new(next);
        Ok(())
    }

    /// Spawn the recurring background refresh.
    ///
    /// The first tick completes immediately and is consumed up front because
    /// the initial refresh already ran synchronously.
    pub fn spawn_refresh(&self, period: Duration) {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(err) = cache.refresh().await {
                    counter!(CREDENTIALS_REFRESH_FAILED).increment(1);
                    warn!(error = %err, "credential refresh failed, keeping previous set");
                }
            }
        });
    }
}

/// Build the replacement password set from two positionally-aligned columns.
fn build_set(passwords: &[String], expiries: &[String], now: NaiveDateTime) -> Vec<String> {
    passwords
        .iter()
        .enumerate()
        .skip(HEADER_ROWS)
        .filter(|(row, _)| {
            let expiry = expiries.get(*row).map(String::as_str).unwrap_or("");
            !row_expired(expiry, now)
        })
        .map(|(_, cell)| cell.trim().to_string())
        .filter(|password| !password.is_empty())
        .collect()
}

/// Whether a row's expiry cell marks it expired at `now`.
///
/// The boundary is `expiry + 1 day < now`: a row stays valid through the
/// whole day after its expiry date. A missing or unparseable cell means the
/// row never expires.
fn row_expired(cell: &str, now: NaiveDateTime) -> bool {
    let Ok(date) = NaiveDate::parse_from_str(cell.trim(), EXPIRY_FORMAT) else {
        return false;
    };
    date.and_time(NaiveTime::MIN) + chrono::Duration::days(1) < now
}
