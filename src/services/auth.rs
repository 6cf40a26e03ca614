//! Auth actions: registration, login and account lookup.

use crate::domain::user::User;
use crate::dto::auth::{LoginDTO, RegisterDTO};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Creates the account; the password is hashed by the domain constructor.
pub fn register_user<R>(repo: &R, dto: &RegisterDTO) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let user = User::create(&dto.name, &dto.email, &dto.password)?;
    repo.create_user(&user).map_err(ServiceError::from)
}

/// Verifies the credentials, returning the user on success.
///
/// An unknown email and a wrong password are indistinguishable to the caller.
pub fn login_user<R>(repo: &R, dto: &LoginDTO) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let email = dto.email.trim().to_lowercase();
    let user = repo
        .get_user_by_email(&email)?
        .ok_or(ServiceError::Unauthorized)?;

    if !user.verify_password(&dto.password) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(user)
}

/// Fetches the authenticated account.
pub fn current_user<R>(repo: &R, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user_id)?
        .ok_or(ServiceError::NotFound)
}
