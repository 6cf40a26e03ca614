//! The `Lead` aggregate and its closed enumerations.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, LeadName, TypeConstraintError};

/// Channel a lead arrived through.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadSource {
    Website,
    Email,
    Telefoon,
    Whatsapp,
    Showroom,
    Overig,
}

impl LeadSource {
    pub const ALL: [LeadSource; 6] = [
        LeadSource::Website,
        LeadSource::Email,
        LeadSource::Telefoon,
        LeadSource::Whatsapp,
        LeadSource::Showroom,
        LeadSource::Overig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Email => "email",
            LeadSource::Telefoon => "telefoon",
            LeadSource::Whatsapp => "whatsapp",
            LeadSource::Showroom => "showroom",
            LeadSource::Overig => "overig",
        }
    }

    /// Comma-separated list of the accepted wire values.
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(LeadSource::Website),
            "email" => Ok(LeadSource::Email),
            "telefoon" => Ok(LeadSource::Telefoon),
            "whatsapp" => Ok(LeadSource::Whatsapp),
            "showroom" => Ok(LeadSource::Showroom),
            "overig" => Ok(LeadSource::Overig),
            other => Err(TypeConstraintError::UnknownVariant {
                value: other.to_string(),
                expected: Self::expected(),
            }),
        }
    }
}

/// Pipeline stage a lead is currently in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    Nieuw,
    Opgepakt,
    Proefrit,
    Offerte,
    Verkocht,
    Afgevallen,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::Nieuw,
        LeadStatus::Opgepakt,
        LeadStatus::Proefrit,
        LeadStatus::Offerte,
        LeadStatus::Verkocht,
        LeadStatus::Afgevallen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Nieuw => "nieuw",
            LeadStatus::Opgepakt => "opgepakt",
            LeadStatus::Proefrit => "proefrit",
            LeadStatus::Offerte => "offerte",
            LeadStatus::Verkocht => "verkocht",
            LeadStatus::Afgevallen => "afgevallen",
        }
    }

    /// Comma-separated list of the accepted wire values.
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nieuw" => Ok(LeadStatus::Nieuw),
            "opgepakt" => Ok(LeadStatus::Opgepakt),
            "proefrit" => Ok(LeadStatus::Proefrit),
            "offerte" => Ok(LeadStatus::Offerte),
            "verkocht" => Ok(LeadStatus::Verkocht),
            "afgevallen" => Ok(LeadStatus::Afgevallen),
            other => Err(TypeConstraintError::UnknownVariant {
                value: other.to_string(),
                expected: Self::expected(),
            }),
        }
    }
}

/// A sales lead.
///
/// Instances are immutable; `update` returns a new value and nothing is
/// persisted until the result is handed back to a repository. `id` and the
/// timestamps are `None` until the lead has been stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub name: LeadName,
    pub email: Email,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub id: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Lead {
    /// Builds a brand-new, unpersisted lead. All four inputs are validated.
    pub fn create(
        name: &str,
        email: &str,
        source: &str,
        status: &str,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: LeadName::new(name)?,
            email: Email::new(email)?,
            source: source.parse()?,
            status: status.parse()?,
            id: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Reconstitutes a lead from storage.
    ///
    /// Callers are expected to pass previously-validated data; the value
    /// object constructors still run so a corrupted row fails loudly.
    pub fn from_persistence(
        id: i32,
        name: &str,
        email: &str,
        source: &str,
        status: &str,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: LeadName::new(name)?,
            email: Email::new(email)?,
            source: source.parse()?,
            status: status.parse()?,
            id: Some(id),
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        })
    }

    /// Applies a partial update, re-validating only the supplied fields.
    ///
    /// `None` means "keep the current value"; identity and timestamps are
    /// carried over from `self`.
    pub fn update(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        source: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: match name {
                Some(value) => LeadName::new(value)?,
                None => self.name.clone(),
            },
            email: match email {
                Some(value) => Email::new(value)?,
                None => self.email.clone(),
            },
            source: match source {
                Some(value) => value.parse()?,
                None => self.source,
            },
            status: match status {
                Some(value) => value.parse()?,
                None => self.status,
            },
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lead() -> Lead {
        Lead::create("Jan de Vries", "JAN@EXAMPLE.COM", "website", "nieuw").unwrap()
    }

    #[test]
    fn create_validates_and_normalizes() {
        let lead = sample_lead();
        assert_eq!(lead.name.as_str(), "Jan de Vries");
        assert_eq!(lead.email.as_str(), "jan@example.com");
        assert_eq!(lead.source, LeadSource::Website);
        assert_eq!(lead.status, LeadStatus::Nieuw);
        assert!(lead.id.is_none());
        assert!(lead.created_at.is_none());
    }

    #[test]
    fn create_rejects_unknown_enum_values() {
        assert!(Lead::create("Jan", "jan@example.com", "fax", "nieuw").is_err());
        assert!(Lead::create("Jan", "jan@example.com", "website", "pending").is_err());
    }

    #[test]
    fn source_and_status_round_trip_all_variants() {
        for source in LeadSource::ALL {
            assert_eq!(source.as_str().parse::<LeadSource>().unwrap(), source);
        }
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
        }
    }

    #[test]
    fn update_without_arguments_is_identity() {
        let created = chrono::Utc::now().naive_utc();
        let lead = Lead::from_persistence(
            7,
            "Jan de Vries",
            "jan@example.com",
            "website",
            "nieuw",
            created,
            created,
        )
        .unwrap();

        let unchanged = lead.update(None, None, None, None).unwrap();
        assert_eq!(unchanged, lead);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let lead = sample_lead();
        let updated = lead.update(None, None, None, Some("opgepakt")).unwrap();

        assert_eq!(updated.status, LeadStatus::Opgepakt);
        assert_eq!(updated.name, lead.name);
        assert_eq!(updated.email, lead.email);
        assert_eq!(updated.source, lead.source);
    }

    #[test]
    fn update_revalidates_changed_fields() {
        let lead = sample_lead();
        assert!(lead.update(Some("x"), None, None, None).is_err());
        assert!(lead.update(None, Some("not-an-email"), None, None).is_err());
        assert!(lead.update(None, None, Some("fax"), None).is_err());
    }

    #[test]
    fn update_preserves_identity() {
        let created = chrono::Utc::now().naive_utc();
        let lead = Lead::from_persistence(
            42,
            "Jan de Vries",
            "jan@example.com",
            "website",
            "nieuw",
            created,
            created,
        )
        .unwrap();

        let updated = lead.update(Some("Piet Jansen"), None, None, None).unwrap();
        assert_eq!(updated.id, Some(42));
        assert_eq!(updated.created_at, Some(created));
        assert_eq!(updated.updated_at, Some(created));
    }
}
