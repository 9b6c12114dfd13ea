//! Cookie Management Infrastructure
//!
//! Rendering of `Set-Cookie` values and lookup in the `Cookie` request header.

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Transport attributes shared by every session cookie of a deployment.
///
/// `SameSite=None` is only honoured by browsers together with `Secure`,
/// so the two are chosen as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Cross-site over HTTPS
    pub const fn production() -> Self {
        Self {
            secure: true,
            same_site: SameSite::None,
        }
    }

    /// Plain HTTP on localhost
    pub const fn development() -> Self {
        Self {
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::development()
    }
}

/// A cookie to be sent in a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl SessionCookie {
    /// HttpOnly cookie on path `/` with the deployment's transport policy
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        expires: DateTime<Utc>,
        policy: CookiePolicy,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires,
            http_only: true,
            secure: policy.secure,
            same_site: policy.same_site,
            path: "/".to_string(),
        }
    }

    /// Empty cookie dated at the Unix epoch; browsers drop it on receipt
    pub fn removal(name: impl Into<String>, policy: CookiePolicy) -> Self {
        Self::new(name, "", DateTime::<Utc>::UNIX_EPOCH, policy)
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self) -> String {
        let mut cookie = format!("{}={}", self.name, self.value);

        cookie.push_str(&format!("; Path={}", self.path));
        // IMF-fixdate (RFC 9110 section 5.6.7)
        cookie.push_str(&format!(
            "; Expires={}",
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        ));

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));

        cookie
    }

    /// Same as [`build_set_cookie`](Self::build_set_cookie), as a header value
    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Extract a cookie value from request headers.
///
/// Looks through every `Cookie` header; empty values count as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_build_set_cookie_development() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let cookie = SessionCookie::new("token", "abc.def.ghi", expires, CookiePolicy::development());

        let header = cookie.build_set_cookie();
        assert!(header.starts_with("token=abc.def.ghi"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Expires=Wed, 02 Jan 2030 03:04:05 GMT"));
        assert!(header.contains("HttpOnly"));
        assert!(!header.contains("Secure"));
        assert!(header.contains("SameSite=Lax"));
    }

    #[test]
    fn test_build_set_cookie_production() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let cookie = SessionCookie::new("visit-id-token", "v", expires, CookiePolicy::production());

        let header = cookie.build_set_cookie();
        assert!(header.contains("; Secure"));
        assert!(header.contains("SameSite=None"));
    }

    #[test]
    fn test_removal_cookie() {
        let cookie = SessionCookie::removal("token", CookiePolicy::development());

        assert_eq!(cookie.value, "");
        assert!(cookie.is_expired_at(Utc::now()));
        assert!(cookie
            .build_set_cookie()
            .contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; token=abc123; empty="),
        );
        headers.append(header::COOKIE, HeaderValue::from_static("visit-id-token=xyz"));

        assert_eq!(extract_cookie(&headers, "token"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(
            extract_cookie(&headers, "visit-id-token"),
            Some("xyz".to_string())
        );
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
