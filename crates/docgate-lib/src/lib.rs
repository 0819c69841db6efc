// ============================
// docgate-lib/src/lib.rs
// ============================
//! Core library for the `docgate` password-gated document server.
//!
//! The interesting part lives in [`auth`]: a periodically-refreshed
//! credential cache, a per-process session-signing scheme, and the
//! access-gate decision applied to content routes. Everything else is
//! plumbing around it.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::auth::{AccessGate, CredentialCache, InstanceSalt, SessionAuthenticator};
use crate::config::Settings;
use crate::source::SheetSource;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Access gate, fixed at startup as protected or unprotected
    pub gate: AccessGate,
    /// Settings manager
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State for a server with no credential source configured.
    pub fn unprotected(settings: Settings) -> Self {
        Self {
            gate: AccessGate::unprotected(),
            settings: Arc::new(settings),
        }
    }

    /// State for a password-protected server.
    pub fn protected(settings: Settings, authenticator: SessionAuthenticator) -> Self {
        Self {
            gate: AccessGate::protected(authenticator),
            settings: Arc::new(settings),
        }
    }

    /// Build state from settings, wiring a sheets-backed credential source
    /// when one is configured.
    ///
    /// Runs the first refresh synchronously so the gate never races an empty
    /// cache against incoming requests. A failure here is fatal: serving with
    /// protection intended but non-functional is worse than failing fast.
    /// Later refreshes run in the background and are allowed to fail.
    pub async fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let Some(source_cfg) = settings.source.clone() else {
            tracing::info!("no credential source configured, serving unprotected");
            return Ok(Self::unprotected(settings));
        };

        let source = Arc::new(SheetSource::new(&source_cfg)?);
        let cache = CredentialCache::new(
            source,
            source_cfg.password_column.clone(),
            source_cfg.expiry_column.clone(),
        );
        cache
            .refresh()
            .await
            .context("initial credential refresh failed")?;
        cache.spawn_refresh(Duration::from_secs(settings.refresh_interval_secs));

        let authenticator = SessionAuthenticator::new(cache, InstanceSalt::generate());
        Ok(Self::protected(settings, authenticator))
    }
}
