//! Request and response data carriers for the lead endpoints.
//!
//! Incoming DTOs are validated with `validator` before anything reaches the
//! domain; the closed enumerations are checked here as well so the 422 body
//! can point at the offending field. `None` in the update DTO always means
//! "keep the existing value".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::lead::{Lead, LeadSource, LeadStatus};
use crate::repository::{DEFAULT_PER_PAGE, LeadListQuery};

fn validate_source(value: &str) -> Result<(), ValidationError> {
    if value.parse::<LeadSource>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("in");
    err.message = Some(format!("Ongeldige bron. Kies uit: {}", LeadSource::expected()).into());
    Err(err)
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.parse::<LeadStatus>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("in");
    err.message = Some(format!("Ongeldige status. Kies uit: {}", LeadStatus::expected()).into());
    Err(err)
}

fn validate_sort(value: &str) -> Result<(), ValidationError> {
    if value == "asc" || value == "desc" {
        return Ok(());
    }
    let mut err = ValidationError::new("in");
    err.message = Some("Ongeldige sorteerrichting. Kies uit: asc, desc".into());
    Err(err)
}

#[derive(Debug, Deserialize, Validate)]
/// Payload for creating a lead; all fields required.
pub struct CreateLeadDTO {
    #[validate(length(min = 2, max = 255, message = "Naam moet tussen 2 en 255 karakters bevatten."))]
    pub name: String,
    #[validate(email(message = "Voer een geldig e-mailadres in."))]
    pub email: String,
    #[validate(custom(function = validate_source))]
    pub source: String,
    #[validate(custom(function = validate_status))]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Payload for a partial update; absent fields are left unchanged.
pub struct UpdateLeadDTO {
    #[validate(length(min = 2, max = 255, message = "Naam moet tussen 2 en 255 karakters bevatten."))]
    pub name: Option<String>,
    #[validate(email(message = "Voer een geldig e-mailadres in."))]
    pub email: Option<String>,
    #[validate(custom(function = validate_source))]
    pub source: Option<String>,
    #[validate(custom(function = validate_status))]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Query parameters accepted by the lead listing.
pub struct LeadFilterDTO {
    #[validate(length(max = 255))]
    pub search: Option<String>,
    #[validate(custom(function = validate_status))]
    pub status: Option<String>,
    #[validate(custom(function = validate_sort))]
    pub sort: Option<String>,
    #[validate(range(min = 1, max = 100, message = "Aantal per pagina moet tussen 1 en 100 liggen."))]
    pub per_page: Option<i64>,
    #[validate(range(min = 1))]
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
/// Query parameters for the exact name-or-email lookup.
pub struct SearchLeadDTO {
    #[validate(length(min = 1, max = 255, message = "The search query is required."))]
    pub q: String,
}

impl From<&LeadFilterDTO> for LeadListQuery {
    fn from(dto: &LeadFilterDTO) -> Self {
        let mut query = LeadListQuery::new().paginate(
            dto.page.unwrap_or(1).max(1) as usize,
            dto.per_page.unwrap_or(DEFAULT_PER_PAGE as i64) as usize,
        );

        if let Some(search) = dto.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.search(search);
        }
        // Already validated, so a parse miss simply leaves the filter unset.
        if let Some(status) = dto.status.as_deref().and_then(|s| s.parse().ok()) {
            query = query.status(status);
        }
        if let Some(sort) = dto.sort.as_deref().and_then(|s| s.parse().ok()) {
            query = query.sort(sort);
        }

        query
    }
}

fn format_timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[derive(Debug, Serialize)]
/// Serialized lead as returned by every lead endpoint.
pub struct LeadResponse {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub source: String,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&Lead> for LeadResponse {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.to_string(),
            email: lead.email.to_string(),
            source: lead.source.to_string(),
            status: lead.status.to_string(),
            created_at: lead.created_at.map(format_timestamp),
            updated_at: lead.updated_at.map(format_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SortDirection;

    #[test]
    fn create_dto_accepts_valid_payload() {
        let dto = CreateLeadDTO {
            name: "Jan de Vries".to_string(),
            email: "jan@example.com".to_string(),
            source: "website".to_string(),
            status: "nieuw".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn create_dto_rejects_unknown_source() {
        let dto = CreateLeadDTO {
            name: "Jan de Vries".to_string(),
            email: "jan@example.com".to_string(),
            source: "fax".to_string(),
            status: "nieuw".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("source"));
    }

    #[test]
    fn update_dto_allows_all_fields_absent() {
        assert!(UpdateLeadDTO::default().validate().is_ok());
    }

    #[test]
    fn update_dto_validates_present_fields() {
        let dto = UpdateLeadDTO {
            email: Some("not-an-email".to_string()),
            ..UpdateLeadDTO::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn filter_dto_rejects_out_of_bounds_per_page() {
        let dto = LeadFilterDTO {
            per_page: Some(200),
            ..LeadFilterDTO::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("per_page"));

        let dto = LeadFilterDTO {
            per_page: Some(0),
            ..LeadFilterDTO::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_dto_converts_into_list_query() {
        let dto = LeadFilterDTO {
            search: Some("jan".to_string()),
            status: Some("nieuw".to_string()),
            sort: Some("asc".to_string()),
            per_page: Some(25),
            page: Some(2),
        };
        let query: LeadListQuery = (&dto).into();

        assert_eq!(query.search.as_deref(), Some("jan"));
        assert_eq!(query.status, Some(crate::domain::lead::LeadStatus::Nieuw));
        assert_eq!(query.sort, SortDirection::Asc);
        assert_eq!(query.pagination.page, 2);
        assert_eq!(query.pagination.per_page, 25);
    }

    #[test]
    fn filter_dto_defaults() {
        let query: LeadListQuery = (&LeadFilterDTO::default()).into();
        assert!(query.search.is_none());
        assert!(query.status.is_none());
        assert_eq!(query.sort, SortDirection::Desc);
        assert_eq!(query.pagination.page, 1);
        assert_eq!(query.pagination.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn lead_response_uses_wire_values() {
        let lead = Lead::create("Jan de Vries", "JAN@EXAMPLE.COM", "website", "nieuw").unwrap();
        let response = LeadResponse::from(&lead);
        assert_eq!(response.email, "jan@example.com");
        assert_eq!(response.source, "website");
        assert_eq!(response.status, "nieuw");
        assert!(response.created_at.is_none());
    }
}
