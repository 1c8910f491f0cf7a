//! Admin session tokens
//!
//! A session is an HS256 JWT carried in an HttpOnly cookie. Nothing is kept
//! server side, so logging out only clears the cookie.

use chrono::{Duration, Utc};
use http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::AdminAccount;
use thiserror::Error;

/// Session cookie name
pub const SESSION_COOKIE: &str = "bakery_session";

/// Session lifetime
pub const SESSION_TTL_HOURS: i64 = 12;

const ISSUER: &str = "storefront";

/// Claims stored in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin account id
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

/// Authenticated administrator, inserted into request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAdmin {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session has expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    Invalid(String),

    #[error("Failed to issue session token: {0}")]
    Issue(String),
}

/// Issues and validates session tokens
pub struct SessionService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    secure_cookie: bool,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("ttl", &self.ttl)
            .field("secure_cookie", &self.secure_cookie)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    pub fn new(secret: &str, secure_cookie: bool) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(SESSION_TTL_HOURS),
            secure_cookie,
        }
    }

    /// Issue a token for `admin`
    pub fn issue(&self, admin: &AdminAccount) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Issue(e.to_string()))
    }

    /// Validate a token and return the admin it names
    pub fn validate(&self, token: &str) -> Result<CurrentAdmin, SessionError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(e.to_string()),
            },
        )?;

        let id = data
            .claims
            .sub
            .parse()
            .map_err(|_| SessionError::Invalid("subject is not an account id".into()))?;

        Ok(CurrentAdmin {
            id,
            username: data.claims.username,
        })
    }

    /// `Set-Cookie` value that stores `token`
    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl.num_seconds()
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that removes the session
    pub fn clear_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Session token from the request's `Cookie` headers
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn admin() -> AdminAccount {
        AdminAccount {
            id: 7,
            username: "admin".into(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let service = SessionService::new("secret", false);
        let token = service.issue(&admin()).unwrap();
        let current = service.validate(&token).unwrap();
        assert_eq!(
            current,
            CurrentAdmin {
                id: 7,
                username: "admin".into()
            }
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = SessionService::new("secret", false).issue(&admin()).unwrap();
        let other = SessionService::new("other-secret", false);
        assert!(matches!(other.validate(&token), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_expired_token() {
        let service = SessionService::new("secret", false);
        let past = Utc::now() - Duration::hours(1);
        let claims = SessionClaims {
            sub: "7".into(),
            username: "admin".into(),
            exp: past.timestamp(),
            iat: (past - Duration::hours(12)).timestamp(),
            iss: ISSUER.into(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.encoding).unwrap();
        assert!(matches!(service.validate(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn test_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; bakery_session=abc.def.ghi; lang=en"),
        );
        assert_eq!(token_from_headers(&headers), Some("abc.def.ghi"));

        let mut empty = HeaderMap::new();
        empty.insert(http::header::COOKIE, HeaderValue::from_static("bakery_session="));
        assert_eq!(token_from_headers(&empty), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let service = SessionService::new("secret", true);
        let cookie = service.session_cookie("tok");
        assert!(cookie.starts_with("bakery_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=43200"));
        assert!(cookie.ends_with("; Secure"));
        assert!(service.clear_cookie().contains("Max-Age=0"));
    }
}
