//! Request and response data carriers for the auth endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::user::User;

#[derive(Debug, Deserialize, Validate)]
/// Payload for registering a new account.
pub struct RegisterDTO {
    #[validate(length(min = 2, max = 255, message = "Naam moet tussen 2 en 255 karakters bevatten."))]
    pub name: String,
    #[validate(email(message = "Voer een geldig e-mailadres in."))]
    pub email: String,
    #[validate(
        length(min = 8, message = "Wachtwoord moet minimaal 8 karakters bevatten."),
        must_match(other = password_confirmation, message = "Wachtwoorden komen niet overeen.")
    )]
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Payload for logging in.
pub struct LoginDTO {
    #[validate(email(message = "Voer een geldig e-mailadres in."))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
/// Query parameters of the email verification link.
pub struct VerifyEmailDTO {
    pub user_id: i32,
    pub token: String,
}

#[derive(Debug, Serialize)]
/// Bearer token issued on registration and login.
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
/// Serialized account as returned by `/api/auth/me`.
pub struct UserResponse {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let fmt = |t: chrono::NaiveDateTime| t.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string();
        Self {
            id: user.id,
            name: user.name.to_string(),
            email: user.email.to_string(),
            email_verified_at: user.email_verified_at.map(fmt),
            created_at: user.created_at.map(fmt),
            updated_at: user.updated_at.map(fmt),
        }
    }
}
