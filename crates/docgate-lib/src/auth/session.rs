// ============================
// docgate-lib/src/auth/session.rs
// ============================
//! Stateless session issuance and verification.
//!
//! Nothing is stored server-side. A session is two pieces of client-held
//! evidence: a creation timestamp and a signature over
//! `password:instance_salt:created`. Validity is recomputed on every request
//! against the *current* credential set, so removing a password from the
//! source revokes its sessions on the next refresh with no explicit step,
//! and a restart (fresh salt) revokes everything.
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::{header, HeaderMap};

use super::cache::CredentialCache;
use super::crypto::{constant_time_eq, sha256_hex, InstanceSalt};

/// Session TTL, enforced through the cookie Max-Age
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24); // 24 hours

/// Cookie holding the session creation timestamp
pub const COOKIE_CREATED: &str = "created";

/// Cookie holding the session signature
pub const COOKIE_SESSION: &str = "session";

/// Client-held session evidence, persisted as two cookies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvidence {
    /// Issuance timestamp in nanoseconds since the epoch, kept as the exact
    /// string form the signature was computed over
    pub created: String,
    /// Hex digest of `password:salt:created`
    pub signature: String,
}

impl SessionEvidence {
    /// Extract evidence from a request's `Cookie` header. Both cookies must
    /// be present; anything less verifies as absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = headers.get(header::COOKIE)?.to_str().ok()?;

        let mut created = None;
        let mut signature = None;
        for part in raw.split(';') {
            match part.trim().split_once('=') {
                Some((COOKIE_CREATED, value)) => created = Some(value.to_string()),
                Some((COOKIE_SESSION, value)) => signature = Some(value.to_string()),
                _ => {}
            }
        }

        Some(Self {
            created: created?,
            signature: signature?,
        })
    }
}

/// Verifies passwords and session evidence against the credential cache.
#[derive(Clone)]
pub struct SessionAuthenticator {
    cache: CredentialCache,
    salt: InstanceSalt,
}

impl SessionAuthenticator {
    pub fn new(cache: CredentialCache, salt: InstanceSalt) -> Self {
        Self { cache, salt }
    }

    /// Exact, case-sensitive match of the trimmed candidate against the
    /// current password set.
    pub fn check_password(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.cache.current().iter().any(|p| p == candidate)
    }

    /// Sign a freshly-authenticated session. The caller hands both values
    /// back to the client as cookies.
    pub fn issue(&self, password: &str, now: SystemTime) -> SessionEvidence {
        let created = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
            .to_string();
        let signature = self.sign(password, &created);
        SessionEvidence { created, signature }
    }

    /// Re-derive the signature for each currently-valid password and compare.
    ///
    /// Deliberately a linear scan over a small, expected-to-be-short list:
    /// it is what gives the revoke-by-removing-a-password property. Does not
    /// scale past a handful of passwords per request; do not replace it with
    /// a stored session table, which would change revocation behavior.
    pub fn verify(&self, evidence: &SessionEvidence) -> bool {
        let passwords = self.cache.current();
        passwords.iter().any(|password| {
            let expected = self.sign(password, &evidence.created);
            constant_time_eq(expected.as_bytes(), evidence.signature.as_bytes())
        })
    }

    fn sign(&self, password: &str, created: &str) -> String {
        sha256_hex(format!("{password}:{}:{created}", self.salt.as_str()).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::StaticSource;
    use axum::http::HeaderValue;
    use std::sync::Arc;

    async fn authenticator_with(passwords: &[&str]) -> (SessionAuthenticator, StaticSource) {
        let mut rows = vec!["Password", "Expires"];
        rows.extend_from_slice(passwords);
        let source = StaticSource::new(&[("A", rows.as_slice()), ("B", &[])]);
        let cache = CredentialCache::new(
            Arc::new(source.clone()),
            "A".to_string(),
            "B".to_string(),
        );
        cache.refresh().await.unwrap();
        (
            SessionAuthenticator::new(cache, InstanceSalt::generate()),
            source,
        )
    }

    #[tokio::test]
    async fn issue_then_verify_round_trips() {
        let (auth, _) = authenticator_with(&["abc123"]).await;
        let evidence = auth.issue("abc123", SystemTime::now());
        assert!(auth.verify(&evidence));
    }

    #[tokio::test]
    async fn tampered_signature_fails() {
        let (auth, _) = authenticator_with(&["abc123"]).await;
        let mut evidence = auth.issue("abc123", SystemTime::now());
        evidence.signature = sha256_hex(b"forged");
        assert!(!auth.verify(&evidence));

        let mut shifted = auth.issue("abc123", SystemTime::now());
        shifted.created.push('0');
        assert!(!auth.verify(&shifted));
    }

    #[tokio::test]
    async fn fresh_salt_invalidates_old_evidence() {
        let (auth, source) = authenticator_with(&["abc123"]).await;
        let evidence = auth.issue("abc123", SystemTime::now());

        // same credential set, restarted process
        let cache = CredentialCache::new(Arc::new(source), "A".to_string(), "B".to_string());
        cache.refresh().await.unwrap();
        let restarted = SessionAuthenticator::new(cache, InstanceSalt::generate());

        assert!(!restarted.verify(&evidence));
    }

    #[tokio::test]
    async fn removing_password_revokes_its_sessions() {
        let (auth, source) = authenticator_with(&["abc123", "other"]).await;
        let evidence = auth.issue("abc123", SystemTime::now());
        assert!(auth.verify(&evidence));

        source.set_columns(&[("A", &["Password", "Expires", "other"]), ("B", &[])]);
        // the next refresh drops "abc123"; no explicit revocation happens
        auth.cache.refresh().await.unwrap();
        assert!(!auth.verify(&evidence));
    }

    #[tokio::test]
    async fn check_password_trims_and_is_case_sensitive() {
        let (auth, _) = authenticator_with(&["abc123"]).await;
        assert!(auth.check_password("abc123"));
        assert!(auth.check_password("  abc123  "));
        assert!(!auth.check_password("ABC123"));
        assert!(!auth.check_password("nope"));
    }

    #[test]
    fn evidence_parses_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("created=123; session=abc; theme=dark"),
        );
        let evidence = SessionEvidence::from_headers(&headers).unwrap();
        assert_eq!(evidence.created, "123");
        assert_eq!(evidence.signature, "abc");
    }

    #[test]
    fn partial_cookies_are_absent_evidence() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("created=123"));
        assert!(SessionEvidence::from_headers(&headers).is_none());
        assert!(SessionEvidence::from_headers(&HeaderMap::new()).is_none());
    }
}
