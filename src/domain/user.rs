//! The `User` aggregate for registration and authentication.

use chrono::NaiveDateTime;

use crate::domain::types::{Email, HashedPassword, TypeConstraintError, UserName};

/// A registered account holder.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub name: UserName,
    pub email: Email,
    pub password: HashedPassword,
    pub id: Option<i32>,
    pub email_verified_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// Builds a brand-new, unpersisted user; the password is hashed here.
    pub fn create(name: &str, email: &str, password: &str) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
            password: HashedPassword::from_plain_text(password)?,
            id: None,
            email_verified_at: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Reconstitutes a user from storage; the stored hash is trusted.
    pub fn from_persistence(
        id: i32,
        name: &str,
        email: &str,
        password_hash: &str,
        email_verified_at: Option<NaiveDateTime>,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
            password: HashedPassword::from_hash(password_hash),
            id: Some(id),
            email_verified_at,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        })
    }

    /// One-way check of a plaintext password against the stored hash.
    pub fn verify_password(&self, plain: &str) -> bool {
        self.password.verify(plain)
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_hashes_password() {
        let user = User::create("Jan de Vries", "JAN@EXAMPLE.COM", "wachtwoord123").unwrap();
        assert_eq!(user.email.as_str(), "jan@example.com");
        assert_ne!(user.password.as_str(), "wachtwoord123");
        assert!(user.verify_password("wachtwoord123"));
        assert!(!user.verify_password("other"));
        assert!(!user.is_email_verified());
    }

    #[test]
    fn create_rejects_short_password() {
        assert_eq!(
            User::create("Jan", "jan@example.com", "kort"),
            Err(TypeConstraintError::PasswordTooShort(8))
        );
    }

    #[test]
    fn from_persistence_keeps_verification_timestamp() {
        let now = chrono::Utc::now().naive_utc();
        let user = User::from_persistence(
            1,
            "Jan de Vries",
            "jan@example.com",
            "$argon2id$stored",
            Some(now),
            now,
            now,
        )
        .unwrap();
        assert!(user.is_email_verified());
        assert_eq!(user.id, Some(1));
    }
}
