// ============================
// docgate-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers.

pub mod login;

pub use login::{login_bad_method, login_form, login_submit};
