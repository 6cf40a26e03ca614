//! Auth endpoints: registration, login, email verification and account info.

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use validator::Validate;

use crate::dto::auth::{LoginDTO, RegisterDTO, TokenResponse, UserResponse, VerifyEmailDTO};
use crate::models::auth::{AuthenticatedUser, create_token};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::validation_error_response;
use crate::services::auth as auth_service;
use crate::services::verification::{EmailVerification, StoredTokenVerification};
use crate::services::{ServiceError, ServiceResult};

type Verifier = StoredTokenVerification<DieselRepository>;

fn issue_token(config: &ServerConfig, user_id: Option<i32>, email: &str) -> ServiceResult<String> {
    let user_id = user_id.ok_or_else(|| {
        ServiceError::Internal("persisted user is missing an id".to_string())
    })?;
    create_token(&config.secret, user_id, email)
        .map_err(|e| ServiceError::Internal(format!("Failed to sign token: {e}")))
}

#[post("/auth/register")]
pub async fn register(
    payload: web::Json<RegisterDTO>,
    repo: web::Data<DieselRepository>,
    verifier: web::Data<Verifier>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = payload.validate() {
        return Ok(validation_error_response(&errors));
    }

    let user = auth_service::register_user(repo.get_ref(), &payload)?;
    let token = issue_token(&config, user.id, user.email.as_str())?;

    // Registration already succeeded; a delivery failure only gets logged.
    if let Some(user_id) = user.id
        && let Err(e) = verifier.send_verification_email(user_id)
    {
        log::error!("Failed to send verification email: {e}");
    }

    Ok(HttpResponse::Created().json(TokenResponse::bearer(token)))
}

#[post("/auth/login")]
pub async fn login(
    payload: web::Json<LoginDTO>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = payload.validate() {
        return Ok(validation_error_response(&errors));
    }

    let user = auth_service::login_user(repo.get_ref(), &payload)?;
    let token = issue_token(&config, user.id, user.email.as_str())?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

#[get("/auth/verify-email")]
pub async fn verify_email(
    params: web::Query<VerifyEmailDTO>,
    verifier: web::Data<Verifier>,
) -> Result<HttpResponse, ServiceError> {
    if verifier.verify(params.user_id, &params.token)? {
        Ok(HttpResponse::Ok().json(json!({ "message": "Email verified successfully." })))
    } else {
        Ok(HttpResponse::BadRequest().json(json!({ "message": "Invalid or expired token." })))
    }
}

#[post("/auth/send-verification-email")]
pub async fn send_verification_email(
    user: AuthenticatedUser,
    verifier: web::Data<Verifier>,
) -> Result<HttpResponse, ServiceError> {
    if verifier.is_verified(user.user_id)? {
        return Ok(
            HttpResponse::BadRequest().json(json!({ "message": "Email already verified." }))
        );
    }

    verifier.send_verification_email(user.user_id)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Verification email sent." })))
}

#[get("/auth/me")]
pub async fn me(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let account = auth_service::current_user(repo.get_ref(), user.user_id)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&account)))
}

/// Tokens are stateless, so logout is a client-side discard; the endpoint
/// exists so clients have a uniform call to make.
#[post("/auth/logout")]
pub async fn logout(_user: AuthenticatedUser) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully logged out." })))
}
