//! Email verification with stored, expiring tokens.
//!
//! One coherent contract: `generate_token` creates a random token with a
//! fixed TTL, `verify` is boolean-returning and consumes the token on
//! success. The production implementation persists tokens through the
//! repository; the in-memory fake exists for tests and accepts any token.

use chrono::{Duration, Utc};
use rand::distr::{Alphanumeric, SampleString};

use crate::repository::{UserReader, UserWriter, VerificationTokenStore};
use crate::services::{ServiceError, ServiceResult};

/// Tokens expire an hour after issue.
const TOKEN_TTL_MINUTES: i64 = 60;
const TOKEN_LENGTH: usize = 64;

pub trait EmailVerification {
    /// Issues a token and "delivers" it to the user's address.
    fn send_verification_email(&self, user_id: i32) -> ServiceResult<()>;
    /// Checks the token; on success marks the address verified and consumes
    /// the token. Returns `false` for unknown, mismatched or expired tokens.
    fn verify(&self, user_id: i32, token: &str) -> ServiceResult<bool>;
    fn is_verified(&self, user_id: i32) -> ServiceResult<bool>;
    fn generate_token(&self, user_id: i32) -> ServiceResult<String>;
}

/// Repository-backed implementation. Actual mail delivery is out of scope;
/// the verification link is written to the log instead.
#[derive(Clone)]
pub struct StoredTokenVerification<R> {
    repo: R,
}

impl<R> StoredTokenVerification<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R> EmailVerification for StoredTokenVerification<R>
where
    R: UserReader + UserWriter + VerificationTokenStore,
{
    fn send_verification_email(&self, user_id: i32) -> ServiceResult<()> {
        let user = self
            .repo
            .get_user_by_id(user_id)?
            .ok_or(ServiceError::NotFound)?;

        let token = self.generate_token(user_id)?;
        log::info!(
            "verification link for {}: /api/auth/verify-email?user_id={user_id}&token={token}",
            user.email
        );
        Ok(())
    }

    fn verify(&self, user_id: i32, token: &str) -> ServiceResult<bool> {
        let Some(stored) = self.repo.get_token(user_id)? else {
            return Ok(false);
        };

        if stored.token != token || stored.expires_at < Utc::now().naive_utc() {
            return Ok(false);
        }

        self.repo.mark_email_verified(user_id)?;
        self.repo.remove_token(user_id)?;
        Ok(true)
    }

    fn is_verified(&self, user_id: i32) -> ServiceResult<bool> {
        Ok(self
            .repo
            .get_user_by_id(user_id)?
            .is_some_and(|user| user.is_email_verified()))
    }

    fn generate_token(&self, user_id: i32) -> ServiceResult<String> {
        let token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LENGTH);
        let expires_at = (Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES)).naive_utc();
        self.repo.store_token(user_id, &token, expires_at)?;
        Ok(token)
    }
}

/// In-memory fake that accepts any token. Test-only convenience; tokens live
/// in process-wide state keyed by user id.
#[cfg(test)]
pub struct FakeEmailVerification<R> {
    repo: R,
    tokens: std::sync::Mutex<std::collections::HashMap<i32, String>>,
}

#[cfg(test)]
impl<R> FakeEmailVerification<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tokens: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
impl<R> EmailVerification for FakeEmailVerification<R>
where
    R: UserReader + UserWriter,
{
    fn send_verification_email(&self, user_id: i32) -> ServiceResult<()> {
        self.generate_token(user_id)?;
        Ok(())
    }

    fn verify(&self, user_id: i32, _token: &str) -> ServiceResult<bool> {
        if self.repo.get_user_by_id(user_id)?.is_none() {
            return Ok(false);
        }
        self.repo.mark_email_verified(user_id)?;
        self.tokens
            .lock()
            .expect("token map poisoned")
            .remove(&user_id);
        Ok(true)
    }

    fn is_verified(&self, user_id: i32) -> ServiceResult<bool> {
        Ok(self
            .repo
            .get_user_by_id(user_id)?
            .is_some_and(|user| user.is_email_verified()))
    }

    fn generate_token(&self, user_id: i32) -> ServiceResult<String> {
        let token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LENGTH);
        self.tokens
            .lock()
            .expect("token map poisoned")
            .insert(user_id, token.clone());
        Ok(token)
    }
}
