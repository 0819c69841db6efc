// ============================
// docgate-lib/src/auth/crypto.rs
// ============================
//! Digest helpers and the per-process instance salt.
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

/// SHA-256 over `data`, hex-encoded.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Constant-time byte slice comparison.
///
/// Returns `false` immediately if lengths differ (length is not secret);
/// otherwise compares all bytes regardless of where differences are.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let result = a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y));

    result == 0
}

/// Process-lifetime salt scoping all issued sessions.
///
/// Generated once at startup from the nanosecond clock; a restart produces a
/// new salt, which invalidates every outstanding session signature.
#[derive(Clone)]
pub struct InstanceSalt(String);

impl InstanceSalt {
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Self(sha256_hex(nanos.to_string().as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for InstanceSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceSalt").finish_non_exhaustive()
    }
}
