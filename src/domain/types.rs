//! Strongly-typed value objects used by domain aggregates.
//!
//! These wrappers enforce their invariants at construction time so that once
//! a value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided name is shorter than the minimum length after trimming.
    #[error("name must be at least {0} characters")]
    NameTooShort(usize),
    /// Provided name exceeds the maximum length after trimming.
    #[error("name must not exceed {0} characters")]
    NameTooLong(usize),
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided value is not a member of a closed enumeration.
    #[error("invalid value `{value}`, expected one of: {expected}")]
    UnknownVariant { value: String, expected: String },
    /// Provided password is too short to be hashed.
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    /// Password hashing itself failed.
    #[error("failed to hash password")]
    HashingFailed,
}

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 255;
const PASSWORD_MIN_LENGTH: usize = 8;

/// Validates a trimmed name against the shared [2,255] length bounds.
fn normalize_name<S: Into<String>>(value: S) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    let len = trimmed.chars().count();
    if len < NAME_MIN_LENGTH {
        return Err(TypeConstraintError::NameTooShort(NAME_MIN_LENGTH));
    }
    if len > NAME_MAX_LENGTH {
        return Err(TypeConstraintError::NameTooLong(NAME_MAX_LENGTH));
    }
    Ok(trimmed)
}

macro_rules! name_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Trims the input and enforces the length bounds.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                Ok(Self(normalize_name(value)?))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

name_newtype!(LeadName, "Lead display name, trimmed, 2 to 255 characters.");
name_newtype!(UserName, "Account holder name, trimmed, 2 to 255 characters.");

/// Lower-cased, trimmed and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// One-way argon2 hash of a user password.
///
/// Constructed either from a plaintext password (hashed on the spot) or
/// reconstituted from a stored hash. Verification never exposes the hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hashes a plaintext password, rejecting inputs shorter than 8 characters.
    pub fn from_plain_text(plain: &str) -> Result<Self, TypeConstraintError> {
        if plain.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(TypeConstraintError::PasswordTooShort(PASSWORD_MIN_LENGTH));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|_| TypeConstraintError::HashingFailed)?;
        Ok(Self(hash.to_string()))
    }

    /// Reconstitutes an already-hashed password from persistence.
    pub fn from_hash<S: Into<String>>(hash: S) -> Self {
        Self(hash.into())
    }

    /// Verifies a plaintext password against this hash.
    pub fn verify(&self, plain: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    /// Borrow the hash as a `&str` for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
