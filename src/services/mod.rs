//! Service-layer orchestration: one function per API operation.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod lead;
pub mod verification;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found.")]
    NotFound,

    #[error("Invalid credentials.")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error.")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(msg) => ServiceError::Validation(msg),
            RepositoryError::ConstraintViolation(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::Unexpected(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Internal(msg) = self {
            log::error!("Internal service error: {msg}");
        }
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("email".into())),
            ServiceError::Conflict(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::DatabaseError("boom".into())),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(ServiceError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn internal_details_stay_out_of_the_response() {
        let err = ServiceError::Internal("connection pool exhausted".into());
        assert_eq!(err.to_string(), "Internal server error.");
    }
}
