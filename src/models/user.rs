use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::user::User as DomainUser;
use crate::repository::VerificationToken;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verified_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::email_verification_tokens)]
pub struct EmailVerificationToken {
    pub user_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        DomainUser::from_persistence(
            user.id,
            &user.name,
            &user.email,
            &user.password_hash,
            user.email_verified_at,
            user.created_at,
            user.updated_at,
        )
    }
}

impl<'a> From<&'a DomainUser> for NewUser<'a> {
    fn from(user: &'a DomainUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            password_hash: user.password.as_str(),
        }
    }
}

impl From<EmailVerificationToken> for VerificationToken {
    fn from(row: EmailVerificationToken) -> Self {
        Self {
            token: row.token,
            expires_at: row.expires_at,
        }
    }
}
