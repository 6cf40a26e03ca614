use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::Lead as DomainLead;
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub source: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub source: &'a str,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
/// Data used when updating a [`Lead`] record.
pub struct UpdateLead<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub source: &'a str,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        DomainLead::from_persistence(
            lead.id,
            &lead.name,
            &lead.email,
            &lead.source,
            &lead.status,
            lead.created_at,
            lead.updated_at,
        )
    }
}

impl<'a> From<&'a DomainLead> for NewLead<'a> {
    fn from(lead: &'a DomainLead) -> Self {
        Self {
            name: lead.name.as_str(),
            email: lead.email.as_str(),
            source: lead.source.as_str(),
            status: lead.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainLead> for UpdateLead<'a> {
    fn from(lead: &'a DomainLead) -> Self {
        Self {
            name: lead.name.as_str(),
            email: lead.email.as_str(),
            source: lead.source.as_str(),
            status: lead.status.as_str(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn row_converts_into_domain() {
        let now = Utc::now().naive_utc();
        let row = Lead {
            id: 1,
            name: "Jan de Vries".to_string(),
            email: "jan@example.com".to_string(),
            source: "website".to_string(),
            status: "nieuw".to_string(),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainLead = row.try_into().unwrap();
        assert_eq!(domain.id, Some(1));
        assert_eq!(domain.name.as_str(), "Jan de Vries");
        assert_eq!(domain.created_at, Some(now));
    }

    #[test]
    fn corrupted_row_fails_loudly() {
        let now = Utc::now().naive_utc();
        let row = Lead {
            id: 1,
            name: "Jan de Vries".to_string(),
            email: "jan@example.com".to_string(),
            source: "carrier-pigeon".to_string(),
            status: "nieuw".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(DomainLead::try_from(row).is_err());
    }

    #[test]
    fn domain_converts_into_insertable() {
        let lead = DomainLead::create("Jan de Vries", "jan@example.com", "website", "nieuw")
            .unwrap();
        let new: NewLead = (&lead).into();
        assert_eq!(new.name, "Jan de Vries");
        assert_eq!(new.email, "jan@example.com");
        assert_eq!(new.source, "website");
        assert_eq!(new.status, "nieuw");
    }
}
