//! Password gate extractor.
//!
//! Reads the shared password from:
//! - `X-App-Password: <password>` header
//! - `Authorization: Bearer <password>` header
//!
//! When no password is configured every request passes.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use brainstorm_core::auth::PasswordGate;

use crate::http::error::AppError;
use crate::state::AppState;

/// Header carrying the shared password.
pub const PASSWORD_HEADER: &str = "x-app-password";

/// Authorized request marker. Extracting this checks the password.
pub struct Authorized;

impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(&state.gate, &parts.headers)
    }
}

/// Check the request headers against the gate.
pub fn authorize(gate: &PasswordGate, headers: &HeaderMap) -> Result<Authorized, AppError> {
    if !gate.is_required() {
        return Ok(Authorized);
    }

    match supplied_password(headers) {
        Some(password) if gate.check(Some(&password)) => Ok(Authorized),
        Some(_) => {
            tracing::warn!("rejected request with wrong password");
            Err(AppError::Unauthorized("Access denied".to_string()))
        }
        None => Err(AppError::Unauthorized(
            "Password required. Provide it via the 'X-App-Password' or 'Authorization: Bearer <password>' header."
                .to_string(),
        )),
    }
}

/// Extract the supplied password from request headers.
///
/// Both headers carry the password verbatim; it must match exactly.
fn supplied_password(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(PASSWORD_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(value.to_string());
    }

    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_open_gate_passes_without_header() {
        assert!(authorize(&PasswordGate::open(), &HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_password_header() {
        let gate = PasswordGate::new(Some("open sesame"));
        assert!(authorize(&gate, &headers(&[("x-app-password", "open sesame")])).is_ok());
        assert!(authorize(&gate, &headers(&[("x-app-password", "open")])).is_err());
    }

    #[test]
    fn test_bearer_header() {
        let gate = PasswordGate::new(Some("pw"));
        assert!(authorize(&gate, &headers(&[("authorization", "Bearer pw")])).is_ok());
        assert!(authorize(&gate, &headers(&[("authorization", "Basic pw")])).is_err());
    }

    #[test]
    fn test_missing_password_is_unauthorized() {
        let gate = PasswordGate::new(Some("pw"));
        let err = authorize(&gate, &HeaderMap::new()).err().unwrap();
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_both_headers_match_exactly() {
        let gate = PasswordGate::new(Some("pw"));
        for value in ["pw ", "Bearer pw "] {
            let name = if value.starts_with("Bearer") { "authorization" } else { "x-app-password" };
            assert!(authorize(&gate, &headers(&[(name, value)])).is_err(), "{name}: {value:?}");
        }

        let padded = PasswordGate::new(Some(" pw"));
        assert!(authorize(&padded, &headers(&[("x-app-password", " pw")])).is_ok());
        assert!(authorize(&padded, &headers(&[("authorization", "Bearer  pw")])).is_ok());
    }
}
