// ============================
// docgate-lib/src/auth/gate.rs
// ============================
//! The access-gate decision.
use super::session::{SessionAuthenticator, SessionEvidence};

/// Outcome of gating one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Serve the content
    Allow,
    /// Redirect the client to the login flow
    Challenge,
}

/// Decides whether a request may see content.
///
/// Protection is fixed once at startup: a server without a configured
/// credential source is unprotected and always allows. Callers apply the
/// gate to content responses only; the login endpoint is exempt because it
/// is never routed through the gate, not because of an excluded-path list.
#[derive(Clone)]
pub struct AccessGate {
    authenticator: Option<SessionAuthenticator>,
}

impl AccessGate {
    pub fn unprotected() -> Self {
        Self {
            authenticator: None,
        }
    }

    pub fn protected(authenticator: SessionAuthenticator) -> Self {
        Self {
            authenticator: Some(authenticator),
        }
    }

    pub fn is_protected(&self) -> bool {
        self.authenticator.is_some()
    }

    /// The authenticator, present only on protected servers.
    pub fn authenticator(&self) -> Option<&SessionAuthenticator> {
        self.authenticator.as_ref()
    }

    pub fn decide(&self, evidence: Option<&SessionEvidence>) -> Decision {
        match (&self.authenticator, evidence) {
            (None, _) => Decision::Allow,
            (Some(auth), Some(evidence)) if auth.verify(evidence) => Decision::Allow,
            (Some(_), _) => Decision::Challenge,
        }
    }
}
