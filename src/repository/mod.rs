use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::db::DbPool;
use crate::domain::lead::{Lead, LeadStatus};
use crate::domain::types::TypeConstraintError;
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod filters;
pub mod lead;
#[cfg(test)]
pub mod mock;
pub mod user;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Ordering applied to the lead listing, newest first by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TypeConstraintError::UnknownVariant {
                value: other.to_string(),
                expected: "asc, desc".to_string(),
            }),
        }
    }
}

/// Filters and ordering for the lead listing, applied in a fixed order:
/// search, status, sort.
#[derive(Debug, Clone, Default)]
pub struct LeadListQuery {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub sort: SortDirection,
    pub pagination: Pagination,
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, sort: SortDirection) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

/// A stored email verification token with its expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationToken {
    pub token: String,
    pub expires_at: NaiveDateTime,
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: i32) -> RepositoryResult<Option<Lead>>;
    fn get_lead_by_name_or_email(&self, query: &str) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, lead: &Lead) -> RepositoryResult<Lead>;
    fn update_lead(&self, lead: &Lead) -> RepositoryResult<Lead>;
    fn delete_lead(&self, lead_id: i32) -> RepositoryResult<bool>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, user: &User) -> RepositoryResult<User>;
    fn mark_email_verified(&self, user_id: i32) -> RepositoryResult<()>;
}

pub trait VerificationTokenStore {
    fn store_token(
        &self,
        user_id: i32,
        token: &str,
        expires_at: NaiveDateTime,
    ) -> RepositoryResult<()>;
    fn get_token(&self, user_id: i32) -> RepositoryResult<Option<VerificationToken>>;
    fn remove_token(&self, user_id: i32) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_direction_parses_known_values() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!(
            "desc".parse::<SortDirection>().unwrap(),
            SortDirection::Desc
        );
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn lead_list_query_builder_defaults() {
        let query = LeadListQuery::new();
        assert!(query.search.is_none());
        assert!(query.status.is_none());
        assert_eq!(query.sort, SortDirection::Desc);
        assert_eq!(query.pagination.page, 1);
        assert_eq!(query.pagination.per_page, DEFAULT_PER_PAGE);
    }
}
