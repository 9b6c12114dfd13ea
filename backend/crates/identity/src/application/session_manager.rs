//! Session Manager
//!
//! Issues, rotates and revokes the Auth Session and creates the Visitor
//! Session. Sessions are stateless: a cookie carrying a signed token whose
//! `exp` equals the cookie expiry.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use kernel::id::{UserId, VisitorId};
use platform::cookie::{CookiePolicy, SessionCookie};

use crate::application::config::IdentityConfig;
use crate::application::token_codec::{HmacTokenCodec, TokenCodec};
use crate::domain::claims::{AuthClaims, VisitorClaims};
use crate::error::TokenError;

/// Cookie carrying the Auth Session token
pub const AUTH_COOKIE_NAME: &str = "token";

/// Cookie carrying the Visitor Session token
pub const VISITOR_COOKIE_NAME: &str = "visit-id-token";

/// Result of [`SessionManager::ensure_visitor_session`]
#[derive(Debug, Clone)]
pub struct VisitorSession {
    pub visitor_id: VisitorId,
    /// `Some` only when a new session was created
    pub cookie: Option<SessionCookie>,
}

impl VisitorSession {
    pub fn is_new(&self) -> bool {
        self.cookie.is_some()
    }
}

pub trait SessionManager: Send + Sync {
    fn issue_auth_session(
        &self,
        user_id: UserId,
        email: &str,
        display_name: &str,
    ) -> Result<SessionCookie, TokenError>;

    /// New token with refreshed expiry. Previously issued tokens stay valid until they expire.
    fn rotate_auth_session(
        &self,
        user_id: UserId,
        email: &str,
        display_name: &str,
    ) -> Result<SessionCookie, TokenError> {
        self.issue_auth_session(user_id, email, display_name)
    }

    /// Cookie that makes the browser drop the Auth Session
    fn revoke_auth_session(&self) -> SessionCookie;

    /// Reuse a valid visitor token or start a new Visitor Session
    fn ensure_visitor_session(&self, existing: Option<&str>)
    -> Result<VisitorSession, TokenError>;

    fn verify_auth(&self, token: &str) -> Result<AuthClaims, TokenError>;

    fn verify_visitor(&self, token: &str) -> Result<VisitorClaims, TokenError>;
}

/// Cookie-based session manager
#[derive(Debug, Clone)]
pub struct CookieSessionManager<C: TokenCodec = HmacTokenCodec> {
    codec: C,
    ttl: Duration,
    policy: CookiePolicy,
}

impl<C: TokenCodec> CookieSessionManager<C> {
    pub fn new(codec: C, ttl: Duration, policy: CookiePolicy) -> Self {
        Self { codec, ttl, policy }
    }

    /// Expiry of a session issued now, truncated to whole seconds
    fn expires_at(&self) -> Result<DateTime<Utc>, TokenError> {
        let ttl = TimeDelta::from_std(self.ttl)
            .map_err(|_| TokenError::Encoding("session lifetime out of range".to_string()))?;

        Utc::now()
            .trunc_subsecs(0)
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("session lifetime out of range".to_string()))
    }
}

impl CookieSessionManager<HmacTokenCodec> {
    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(
            HmacTokenCodec::new(config.signing_key.clone()),
            config.session_ttl,
            config.cookie_policy(),
        )
    }
}

impl<C: TokenCodec> SessionManager for CookieSessionManager<C> {
    fn issue_auth_session(
        &self,
        user_id: UserId,
        email: &str,
        display_name: &str,
    ) -> Result<SessionCookie, TokenError> {
        let expires_at = self.expires_at()?;
        let claims = AuthClaims::new(user_id, email, display_name, expires_at);
        let token = self.codec.sign(&claims)?;

        Ok(SessionCookie::new(AUTH_COOKIE_NAME, token, expires_at, self.policy))
    }

    fn revoke_auth_session(&self) -> SessionCookie {
        SessionCookie::removal(AUTH_COOKIE_NAME, self.policy)
    }

    fn ensure_visitor_session(
        &self,
        existing: Option<&str>,
    ) -> Result<VisitorSession, TokenError> {
        if let Some(token) = existing {
            match self.verify_visitor(token) {
                Ok(claims) => {
                    return Ok(VisitorSession {
                        visitor_id: claims.visit_id,
                        cookie: None,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Replacing unusable visitor token");
                }
            }
        }

        let expires_at = self.expires_at()?;
        let claims = VisitorClaims::new(VisitorId::new(), expires_at);
        let token = self.codec.sign(&claims)?;

        Ok(VisitorSession {
            visitor_id: claims.visit_id,
            cookie: Some(SessionCookie::new(
                VISITOR_COOKIE_NAME,
                token,
                expires_at,
                self.policy,
            )),
        })
    }

    fn verify_auth(&self, token: &str) -> Result<AuthClaims, TokenError> {
        self.codec.verify(token)
    }

    fn verify_visitor(&self, token: &str) -> Result<VisitorClaims, TokenError> {
        self.codec.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::DeploymentMode;
    use crate::domain::signing_key::SigningKey;
    use platform::cookie::SameSite;

    fn manager(mode: DeploymentMode) -> CookieSessionManager {
        let config = IdentityConfig::new(SigningKey::new("session-test-secret").unwrap(), mode);
        CookieSessionManager::from_config(&config)
    }

    #[test]
    fn test_issue_auth_session() {
        let sessions = manager(DeploymentMode::Development);
        let user_id = UserId::new();
        let before = Utc::now();

        let cookie = sessions
            .issue_auth_session(user_id, "alice@example.com", "alice")
            .unwrap();

        assert_eq!(cookie.name, AUTH_COOKIE_NAME);
        assert!(!cookie.value.is_empty());
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");

        let lifetime = cookie.expires - before;
        assert!(lifetime <= TimeDelta::hours(1) + TimeDelta::seconds(1));
        assert!(lifetime >= TimeDelta::hours(1) - TimeDelta::seconds(2));

        let claims = sessions.verify_auth(&cookie.value).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, cookie.expires.timestamp());
        assert_eq!(cookie.expires.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_rotate_auth_session_carries_new_claims() {
        let sessions = manager(DeploymentMode::Development);
        let user_id = UserId::new();

        let first = sessions
            .issue_auth_session(user_id, "old@example.com", "old")
            .unwrap();
        let rotated = sessions
            .rotate_auth_session(user_id, "new@example.com", "new")
            .unwrap();

        assert_ne!(first.value, rotated.value);
        assert!(rotated.expires >= first.expires);

        let claims = sessions.verify_auth(&rotated.value).unwrap();
        assert_eq!(claims.email, "new@example.com");
        assert_eq!(claims.username, "new");
        // stateless: the previous token is still accepted until it expires
        assert!(sessions.verify_auth(&first.value).is_ok());
    }

    #[test]
    fn test_revoke_auth_session() {
        let cookie = manager(DeploymentMode::Development).revoke_auth_session();

        assert_eq!(cookie.name, AUTH_COOKIE_NAME);
        assert_eq!(cookie.value, "");
        assert!(cookie.expires < Utc::now());
    }

    #[test]
    fn test_ensure_visitor_session_is_idempotent() {
        let sessions = manager(DeploymentMode::Development);

        let first = sessions.ensure_visitor_session(None).unwrap();
        assert!(first.is_new());
        let cookie = first.cookie.clone().unwrap();
        assert_eq!(cookie.name, VISITOR_COOKIE_NAME);
        assert_eq!(
            sessions.verify_visitor(&cookie.value).unwrap().exp,
            cookie.expires.timestamp()
        );

        let second = sessions.ensure_visitor_session(Some(cookie.value.as_str())).unwrap();
        assert!(!second.is_new());
        assert_eq!(second.visitor_id, first.visitor_id);
    }

    #[test]
    fn test_ensure_visitor_session_replaces_invalid_token() {
        let sessions = manager(DeploymentMode::Development);

        let session = sessions.ensure_visitor_session(Some("garbage")).unwrap();
        assert!(session.is_new());

        let other = manager(DeploymentMode::Development);
        let auth_cookie = other
            .issue_auth_session(UserId::new(), "a@example.com", "a")
            .unwrap();
        // an auth token does not have the visitor claim shape
        assert!(
            sessions
                .ensure_visitor_session(Some(auth_cookie.value.as_str()))
                .unwrap()
                .is_new()
        );
    }

    #[test]
    fn test_visitor_ids_are_distinct() {
        let sessions = manager(DeploymentMode::Development);
        let a = sessions.ensure_visitor_session(None).unwrap();
        let b = sessions.ensure_visitor_session(None).unwrap();
        assert_ne!(a.visitor_id, b.visitor_id);
        assert_eq!(a.visitor_id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_cookie_policy_follows_deployment_mode() {
        let production = manager(DeploymentMode::Production)
            .issue_auth_session(UserId::new(), "a@example.com", "a")
            .unwrap();
        assert!(production.secure);
        assert_eq!(production.same_site, SameSite::None);
        assert!(production.build_set_cookie().contains("; Secure; SameSite=None"));

        let development = manager(DeploymentMode::Development)
            .issue_auth_session(UserId::new(), "a@example.com", "a")
            .unwrap();
        assert!(!development.secure);
        assert_eq!(development.same_site, SameSite::Lax);
        assert!(!development.build_set_cookie().contains("Secure"));
    }

    #[test]
    fn test_session_manager_is_object_safe() {
        let sessions: std::sync::Arc<dyn SessionManager> =
            std::sync::Arc::new(manager(DeploymentMode::Development));
        let cookie = sessions.ensure_visitor_session(None).unwrap().cookie.unwrap();
        assert!(sessions.verify_visitor(&cookie.value).is_ok());
    }
}
