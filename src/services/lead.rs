//! Lead actions: each function is one orchestration step over the
//! repository traits, mirroring one API operation.

use crate::domain::lead::Lead;
use crate::dto::lead::{CreateLeadDTO, LeadFilterDTO, UpdateLeadDTO};
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns the filtered, paginated lead listing with the total match count.
pub fn list_leads<R>(repo: &R, filters: &LeadFilterDTO) -> ServiceResult<(usize, Vec<Lead>)>
where
    R: LeadReader + ?Sized,
{
    let query: LeadListQuery = filters.into();
    repo.list_leads(query).map_err(ServiceError::from)
}

/// Fetches a single lead by id.
pub fn get_lead<R>(repo: &R, lead_id: i32) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    repo.get_lead_by_id(lead_id)?
        .ok_or(ServiceError::NotFound)
}

/// Exact name-or-email lookup.
pub fn find_lead<R>(repo: &R, query: &str) -> ServiceResult<Option<Lead>>
where
    R: LeadReader + ?Sized,
{
    repo.get_lead_by_name_or_email(query)
        .map_err(ServiceError::from)
}

/// Validates the payload into a new aggregate and persists it.
pub fn create_lead<R>(repo: &R, dto: &CreateLeadDTO) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let lead = Lead::create(&dto.name, &dto.email, &dto.source, &dto.status)?;
    repo.create_lead(&lead).map_err(ServiceError::from)
}

/// Fetches the existing aggregate, applies the partial update, persists.
pub fn update_lead<R>(repo: &R, lead_id: i32, dto: &UpdateLeadDTO) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let existing = get_lead(repo, lead_id)?;
    let updated = existing.update(
        dto.name.as_deref(),
        dto.email.as_deref(),
        dto.source.as_deref(),
        dto.status.as_deref(),
    )?;
    repo.update_lead(&updated).map_err(ServiceError::from)
}

/// Verifies existence before deleting, so a missing id surfaces as NotFound
/// rather than a silent no-op.
pub fn delete_lead<R>(repo: &R, lead_id: i32) -> ServiceResult<bool>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    get_lead(repo, lead_id)?;
    repo.delete_lead(lead_id).map_err(ServiceError::from)
}
