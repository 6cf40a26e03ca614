//! Bearer-token authentication model.
//!
//! Tokens are stateless HS256 JWTs carrying the user id and email. Handlers
//! receive an [`AuthenticatedUser`] argument which is extracted from the
//! `Authorization: Bearer` header; extraction failure is a 401 before the
//! handler body runs.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;
use crate::services::ServiceError;

/// Token time-to-live: seven days.
const TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs a bearer token for the given user.
pub fn create_token(
    secret: &str,
    user_id: i32,
    email: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies a bearer token signature and expiry, returning its claims.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Identity of the caller, proven by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = ServiceError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| ServiceError::Unauthorized)?;
        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req).map_err(Into::into))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or(ServiceError::Unauthorized)?;

    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ServiceError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ServiceError::Unauthorized)?;

    let claims =
        decode_token(&config.secret, token).map_err(|_| ServiceError::Unauthorized)?;

    claims.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_claims() {
        let token = create_token("test-secret", 7, "jan@example.com").unwrap();
        let claims = decode_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "jan@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token("test-secret", 7, "jan@example.com").unwrap();
        assert!(decode_token("other-secret", &token).is_err());
    }

    #[test]
    fn claims_with_bad_subject_are_rejected() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            email: "jan@example.com".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(AuthenticatedUser::try_from(claims).is_err());
    }
}
