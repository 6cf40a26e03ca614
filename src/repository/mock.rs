//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::lead::Lead;
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    LeadListQuery, LeadReader, LeadWriter, UserReader, UserWriter, VerificationToken,
    VerificationTokenStore,
};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: i32) -> RepositoryResult<Option<Lead>>;
        fn get_lead_by_name_or_email(&self, query: &str) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, lead: &Lead) -> RepositoryResult<Lead>;
        fn update_lead(&self, lead: &Lead) -> RepositoryResult<Lead>;
        fn delete_lead(&self, lead_id: i32) -> RepositoryResult<bool>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, user: &User) -> RepositoryResult<User>;
        fn mark_email_verified(&self, user_id: i32) -> RepositoryResult<()>;
    }

    impl VerificationTokenStore for Repository {
        fn store_token(
            &self,
            user_id: i32,
            token: &str,
            expires_at: NaiveDateTime,
        ) -> RepositoryResult<()>;
        fn get_token(&self, user_id: i32) -> RepositoryResult<Option<VerificationToken>>;
        fn remove_token(&self, user_id: i32) -> RepositoryResult<()>;
    }
}
