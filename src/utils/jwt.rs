use crate::entities::UserRole;
use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i32, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    BadSignature,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::AuthError(err.to_string())
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn issue(&self, user_id: i32, email: &str, role: UserRole) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(AppError::from)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Invalid,
            })?;

        claims.user_id()?;
        Ok(claims)
    }

    pub fn expiry_hours(&self) -> i64 {
        self.expiry_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate() {
        let jwt = JwtService::new("secret-a", 24);
        let token = jwt.issue(42, "golfer@example.com", UserRole::Staff).unwrap();

        let claims = jwt.validate(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "golfer@example.com");
        assert_eq!(claims.role, UserRole::Staff);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_rejects_token_signed_with_other_key() {
        let issuer = JwtService::new("secret-a", 24);
        let verifier = JwtService::new("secret-b", 24);
        let token = issuer.issue(1, "a@example.com", UserRole::Customer).unwrap();

        assert_eq!(verifier.validate(&token).unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn test_rejects_expired_token() {
        let jwt = JwtService::new("secret-a", 24);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            email: "a@example.com".to_string(),
            role: UserRole::Customer,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret-a"),
        )
        .unwrap();

        assert_eq!(jwt.validate(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_rejects_garbage() {
        let jwt = JwtService::new("secret-a", 24);
        assert_eq!(jwt.validate("not.a.token").unwrap_err(), TokenError::Invalid);
    }
}
