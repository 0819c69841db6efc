// ============================
// docgate-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod cache;
pub mod crypto;
pub mod gate;
pub mod session;

pub use cache::CredentialCache;
pub use crypto::InstanceSalt;
pub use gate::{AccessGate, Decision};
pub use session::{SessionAuthenticator, SessionEvidence, SESSION_TTL};
