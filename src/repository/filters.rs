//! Query transformations for the lead listing.
//!
//! Each stage is a pure `BoxedQuery -> BoxedQuery` function; a listing is
//! filtered by folding the ordered stage list over the base query. Stages are
//! generic over the select clause so the same pipeline restricts both the
//! page query and the matching count query.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::lead::LeadStatus;
use crate::repository::{LeadListQuery, SortDirection};
use crate::schema::leads;

pub type BoxedLeadQuery<ST> = leads::BoxedQuery<'static, Sqlite, ST>;
pub type LeadFilter<ST> = Box<dyn Fn(BoxedLeadQuery<ST>) -> BoxedLeadQuery<ST>>;

/// Case-insensitive substring match on name OR email. A blank term leaves the
/// query untouched.
pub fn search_by_name_or_email<ST>(term: Option<&str>) -> LeadFilter<ST> {
    let pattern = term
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("%{t}%"));

    Box::new(move |query| match &pattern {
        Some(p) => query.filter(leads::name.like(p.clone()).or(leads::email.like(p.clone()))),
        None => query,
    })
}

/// Exact status match; absent status leaves the query untouched.
pub fn filter_by_status<ST>(status: Option<LeadStatus>) -> LeadFilter<ST> {
    Box::new(move |query| match status {
        Some(status) => query.filter(leads::status.eq(status.as_str())),
        None => query,
    })
}

/// Orders by creation time. Always applied, after the restrictions.
pub fn sort_by_date<ST>(direction: SortDirection) -> LeadFilter<ST> {
    Box::new(move |query| match direction {
        SortDirection::Asc => query.order(leads::created_at.asc()),
        SortDirection::Desc => query.order(leads::created_at.desc()),
    })
}

/// The row-restricting stages only, shared by the page and count queries.
pub fn restrictions<ST>(query: &LeadListQuery) -> Vec<LeadFilter<ST>> {
    vec![
        search_by_name_or_email(query.search.as_deref()),
        filter_by_status(query.status),
    ]
}

/// The full ordered pipeline: search, status, sort.
pub fn pipeline<ST>(query: &LeadListQuery) -> Vec<LeadFilter<ST>> {
    let mut stages = restrictions(query);
    stages.push(sort_by_date(query.sort));
    stages
}

/// Folds the stage list over the base query.
pub fn apply<ST>(query: BoxedLeadQuery<ST>, stages: &[LeadFilter<ST>]) -> BoxedLeadQuery<ST> {
    stages.iter().fold(query, |query, stage| stage(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(query: &LeadListQuery) -> String {
        let filtered = apply(leads::table.into_boxed(), &pipeline(query));
        diesel::debug_query::<Sqlite, _>(&filtered).to_string()
    }

    #[test]
    fn empty_query_only_sorts() {
        let sql = sql_for(&LeadListQuery::new());
        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains("status"));
        assert!(sql.contains("ORDER BY"));
        assert!(sql.contains("DESC"));
    }

    #[test]
    fn search_restricts_name_or_email() {
        let sql = sql_for(&LeadListQuery::new().search("jan"));
        assert!(sql.contains("name"));
        assert!(sql.contains("email"));
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("%jan%"));
    }

    #[test]
    fn blank_search_is_skipped() {
        let sql = sql_for(&LeadListQuery::new().search("   "));
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn status_and_sort_compose_with_search() {
        let query = LeadListQuery::new()
            .search("jan")
            .status(LeadStatus::Nieuw)
            .sort(SortDirection::Asc);
        let sql = sql_for(&query);

        assert!(sql.contains("LIKE"));
        assert!(sql.contains("status"));
        assert!(sql.contains("ASC"));
        // Restrictions come before the ordering clause.
        assert!(sql.find("LIKE").unwrap() < sql.find("ORDER BY").unwrap());
    }
}
