//! Request Authentication Filter
//!
//! Resolves the caller's identity from the session cookies. Every failure
//! renders as the same 401; the cause is only logged.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::{UserId, VisitorId};
use platform::cookie::extract_cookie;

use crate::application::config::IdentityConfig;
use crate::application::session_manager::{
    AUTH_COOKIE_NAME, CookieSessionManager, SessionManager, VISITOR_COOKIE_NAME,
};
use crate::domain::claims::AuthClaims;
use crate::error::AuthFailure;

/// Session manager shared by every router that needs an identity
#[derive(Clone)]
pub struct IdentityState {
    pub sessions: Arc<dyn SessionManager>,
}

impl IdentityState {
    pub fn new(sessions: Arc<dyn SessionManager>) -> Self {
        Self { sessions }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(Arc::new(CookieSessionManager::from_config(config)))
    }
}

/// Claims of a valid `token` cookie
pub fn resolve_auth_claims(
    headers: &HeaderMap,
    sessions: &dyn SessionManager,
) -> Result<AuthClaims, AuthFailure> {
    let token = extract_cookie(headers, AUTH_COOKIE_NAME).ok_or(AuthFailure::NoCookie)?;
    Ok(sessions.verify_auth(&token)?)
}

pub fn resolve_auth_identity(
    headers: &HeaderMap,
    sessions: &dyn SessionManager,
) -> Result<UserId, AuthFailure> {
    resolve_auth_claims(headers, sessions).map(|claims| claims.user_id)
}

/// Visitor id of a valid `visit-id-token` cookie. Never creates a session.
pub fn resolve_visitor_identity(
    headers: &HeaderMap,
    sessions: &dyn SessionManager,
) -> Result<VisitorId, AuthFailure> {
    let token = extract_cookie(headers, VISITOR_COOKIE_NAME).ok_or(AuthFailure::NoCookie)?;
    Ok(sessions.verify_visitor(&token)?.visit_id)
}

/// Extractor for an authenticated user
#[derive(Debug, Clone)]
pub struct AuthSession(pub AuthClaims);

impl<S> FromRequestParts<S> for AuthSession
where
    IdentityState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthFailure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_auth_session`
        if let Some(session) = parts.extensions.get::<AuthSession>() {
            return Ok(session.clone());
        }

        let identity = IdentityState::from_ref(state);
        resolve_auth_claims(&parts.headers, identity.sessions.as_ref()).map(AuthSession)
    }
}

/// Extractor for the anonymous visitor behind a request
#[derive(Debug, Clone, Copy)]
pub struct VisitorIdentity(pub VisitorId);

impl<S> FromRequestParts<S> for VisitorIdentity
where
    IdentityState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthFailure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = IdentityState::from_ref(state);
        resolve_visitor_identity(&parts.headers, identity.sessions.as_ref()).map(VisitorIdentity)
    }
}

/// Middleware that requires a valid Auth Session.
///
/// Stores the resolved [`AuthSession`] in request extensions.
pub async fn require_auth_session(
    State(identity): State<IdentityState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthFailure> {
    let claims = resolve_auth_claims(req.headers(), identity.sessions.as_ref())?;

    tracing::debug!(user_id = %claims.user_id, "Authenticated request");
    req.extensions_mut().insert(AuthSession(claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::DeploymentMode;
    use crate::domain::signing_key::SigningKey;
    use crate::error::TokenError;
    use axum::http::{HeaderValue, header};
    use std::time::Duration;

    fn sessions() -> CookieSessionManager {
        CookieSessionManager::from_config(&IdentityConfig::new(
            SigningKey::new("filter-test-secret").unwrap(),
            DeploymentMode::Development,
        ))
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_resolve_auth_identity_after_login() {
        let sessions = sessions();
        let user_id = UserId::new();
        let cookie = sessions
            .issue_auth_session(user_id, "alice@example.com", "alice")
            .unwrap();

        let headers = headers_with_cookie(&format!("{}={}", cookie.name, cookie.value));
        assert_eq!(resolve_auth_identity(&headers, &sessions).unwrap(), user_id);
    }

    #[test]
    fn test_missing_cookie_is_no_cookie() {
        let sessions = sessions();
        let headers = headers_with_cookie("other=1");

        assert_eq!(
            resolve_auth_identity(&headers, &sessions).unwrap_err(),
            AuthFailure::NoCookie
        );
        assert_eq!(
            resolve_visitor_identity(&HeaderMap::new(), &sessions).unwrap_err(),
            AuthFailure::NoCookie
        );
    }

    #[test]
    fn test_expired_cookie_is_rejected() {
        let config = IdentityConfig::new(
            SigningKey::new("filter-test-secret").unwrap(),
            DeploymentMode::Development,
        );
        let sessions = CookieSessionManager::from_config(&config);
        let expired = CookieSessionManager::from_config(&config.with_session_ttl(Duration::ZERO));

        // exp is the issue second; wait until it lies strictly in the past
        let cookie = expired
            .issue_auth_session(UserId::new(), "a@example.com", "a")
            .unwrap();
        std::thread::sleep(Duration::from_millis(1100));

        let headers = headers_with_cookie(&format!("token={}", cookie.value));
        assert_eq!(
            resolve_auth_identity(&headers, &sessions).unwrap_err(),
            AuthFailure::InvalidOrExpired(TokenError::Expired)
        );
    }

    #[test]
    fn test_auth_token_is_not_a_visitor_token() {
        let sessions = sessions();
        let cookie = sessions
            .issue_auth_session(UserId::new(), "a@example.com", "a")
            .unwrap();

        let headers = headers_with_cookie(&format!("visit-id-token={}", cookie.value));
        assert_eq!(
            resolve_visitor_identity(&headers, &sessions).unwrap_err(),
            AuthFailure::InvalidOrExpired(TokenError::Malformed)
        );
    }

    #[test]
    fn test_resolve_visitor_identity() {
        let sessions = sessions();
        let visitor = sessions.ensure_visitor_session(None).unwrap();
        let cookie = visitor.cookie.unwrap();

        let headers = headers_with_cookie(&format!("visit-id-token={}", cookie.value));
        assert_eq!(
            resolve_visitor_identity(&headers, &sessions).unwrap(),
            visitor.visitor_id
        );
    }
}
