//! Application Configuration
//!
//! Read once at startup; shared read-only behind `Arc` afterwards.

use std::sync::Arc;
use std::time::Duration;

use derive_more::Display;
use platform::cookie::CookiePolicy;

use crate::domain::signing_key::SigningKey;
use crate::error::ConfigError;

/// Environment variable selecting the deployment mode
pub const DEPLOYMENT_MODE_ENV: &str = "ENV";

/// Lifetime of both session kinds
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Deployment mode, decides cookie transport attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DeploymentMode {
    #[display("production")]
    Production,
    #[display("development")]
    Development,
}

impl DeploymentMode {
    /// `"production"` selects production; anything else, including unset, is development
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => DeploymentMode::Production,
            _ => DeploymentMode::Development,
        }
    }

    pub fn cookie_policy(&self) -> CookiePolicy {
        match self {
            DeploymentMode::Production => CookiePolicy::production(),
            DeploymentMode::Development => CookiePolicy::development(),
        }
    }
}

/// Identity configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub signing_key: Arc<SigningKey>,
    pub mode: DeploymentMode,
    pub session_ttl: Duration,
}

impl IdentityConfig {
    pub fn new(signing_key: SigningKey, mode: DeploymentMode) -> Self {
        Self {
            signing_key: Arc::new(signing_key),
            mode,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Load `JWT_SECRET_KEY` and `ENV`
    pub fn from_env() -> Result<Self, ConfigError> {
        let signing_key = SigningKey::from_env()?;
        let mode = DeploymentMode::from_env_value(std::env::var(DEPLOYMENT_MODE_ENV).ok().as_deref());
        Ok(Self::new(signing_key, mode))
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn cookie_policy(&self) -> CookiePolicy {
        self.mode.cookie_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::cookie::SameSite;

    #[test]
    fn test_deployment_mode_from_env_value() {
        assert_eq!(
            DeploymentMode::from_env_value(Some("production")),
            DeploymentMode::Production
        );
        assert_eq!(
            DeploymentMode::from_env_value(Some("Production")),
            DeploymentMode::Development
        );
        assert_eq!(
            DeploymentMode::from_env_value(Some("staging")),
            DeploymentMode::Development
        );
        assert_eq!(DeploymentMode::from_env_value(None), DeploymentMode::Development);
    }

    #[test]
    fn test_cookie_policy_per_mode() {
        let production = DeploymentMode::Production.cookie_policy();
        assert!(production.secure);
        assert_eq!(production.same_site, SameSite::None);

        let development = DeploymentMode::Development.cookie_policy();
        assert!(!development.secure);
        assert_eq!(development.same_site, SameSite::Lax);
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        let config = IdentityConfig::new(
            SigningKey::new("k").unwrap(),
            DeploymentMode::Development,
        );
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.mode.to_string(), "development");
    }
}
