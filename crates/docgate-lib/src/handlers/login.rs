// ============================
// docgate-lib/src/handlers/login.rs
// ============================
//! Login form and submission handling.
use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use metrics::counter;
use serde::Deserialize;
use tracing::info;

use crate::auth::session::{COOKIE_CREATED, COOKIE_SESSION};
use crate::auth::{SessionEvidence, SESSION_TTL};
use crate::error::AppError;
use crate::metrics::{LOGIN_ACCEPTED, LOGIN_REJECTED};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// GET /login
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    let notice = match query.error.as_deref() {
        Some("invalid_pass") => "<p class=\"error\">Invalid password.</p>",
        Some("invalid_method") => "<p class=\"error\">Unsupported request method.</p>",
        _ => "",
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Login</title></head>
<body>
{notice}
<form method="post" action="/login">
  <label for="password">Password</label>
  <input type="password" id="password" name="password" autofocus>
  <button type="submit">Enter</button>
</form>
</body>
</html>
"#
    ))
}

/// POST /login
///
/// A valid password gets a signed session handed back as two cookies and a
/// redirect to the content root; an invalid one bounces back to the form
/// with a distinguishable error marker.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let authenticator = state
        .gate
        .authenticator()
        .ok_or(AppError::ProtectionDisabled)?;

    if authenticator.check_password(&form.password) {
        counter!(LOGIN_ACCEPTED).increment(1);
        info!("login accepted");
        let evidence = authenticator.issue(form.password.trim(), SystemTime::now());
        Ok((evidence_cookies(&evidence), Redirect::to("/")).into_response())
    } else {
        counter!(LOGIN_REJECTED).increment(1);
        info!("login rejected");
        Ok(Redirect::to("/login?error=invalid_pass").into_response())
    }
}

/// Fallback for unsupported methods on /login
pub async fn login_bad_method() -> Redirect {
    Redirect::to("/login?error=invalid_method")
}

fn evidence_cookies(evidence: &SessionEvidence) -> AppendHeaders<[(HeaderName, String); 2]> {
    let max_age = SESSION_TTL.as_secs();
    AppendHeaders([
        (
            header::SET_COOKIE,
            format!(
                "{COOKIE_CREATED}={}; Max-Age={max_age}; Path=/; HttpOnly",
                evidence.created
            ),
        ),
        (
            header::SET_COOKIE,
            format!(
                "{COOKIE_SESSION}={}; Max-Age={max_age}; Path=/; HttpOnly",
                evidence.signature
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookies_carry_ttl_and_httponly() {
        let evidence = SessionEvidence {
            created: "123".to_string(),
            signature: "abc".to_string(),
        };
        let AppendHeaders([(_, created), (_, session)]) = evidence_cookies(&evidence);
        assert_eq!(created, "created=123; Max-Age=86400; Path=/; HttpOnly");
        assert_eq!(session, "session=abc; Max-Age=86400; Path=/; HttpOnly");
    }
}
