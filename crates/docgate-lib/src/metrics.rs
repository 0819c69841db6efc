// ==============
// docgate-lib/src/metrics.rs

//! Central place for metric keys
pub const CREDENTIALS_REFRESH_OK: &str = "credentials.refresh_ok";
pub const CREDENTIALS_REFRESH_FAILED: &str = "credentials.refresh_failed";
pub const CREDENTIALS_ACTIVE: &str = "credentials.active";
pub const LOGIN_ACCEPTED: &str = "login.accepted";
pub const LOGIN_REJECTED: &str = "login.rejected";
pub const GATE_ALLOWED: &str = "gate.allowed";
pub const GATE_CHALLENGED: &str = "gate.challenged";
