use diesel::prelude::*;

use crate::domain::lead::Lead;
use crate::repository::errors::RepositoryResult;
use crate::repository::filters::{apply, pipeline, restrictions};
use crate::repository::{DieselRepository, LeadListQuery, LeadReader, LeadWriter};

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: i32) -> RepositoryResult<Option<Lead>> {
        use crate::models::lead::Lead as DbLead;
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .find(id)
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(TryInto::try_into).transpose().map_err(Into::into)
    }

    fn get_lead_by_name_or_email(&self, query: &str) -> RepositoryResult<Option<Lead>> {
        use crate::models::lead::Lead as DbLead;
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .filter(leads::name.eq(query).or(leads::email.eq(query)))
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(TryInto::try_into).transpose().map_err(Into::into)
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        use crate::models::lead::Lead as DbLead;
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let page = query.pagination.page.max(1) as i64;
        let per_page = query.pagination.per_page.max(1) as i64;
        let offset = (page - 1) * per_page;

        let total: i64 = apply(leads::table.count().into_boxed(), &restrictions(&query))
            .get_result(&mut conn)?;

        let items = apply(leads::table.into_boxed(), &pipeline(&query))
            .limit(per_page)
            .offset(offset)
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Lead>, _>>()?;

        Ok((total as usize, items))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, lead: &Lead) -> RepositoryResult<Lead> {
        use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead};
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let insertable: DbNewLead = lead.into();
        let created = diesel::insert_into(leads::table)
            .values(&insertable)
            .get_result::<DbLead>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_lead(&self, lead: &Lead) -> RepositoryResult<Lead> {
        use crate::models::lead::{Lead as DbLead, UpdateLead as DbUpdateLead};
        use crate::schema::leads;

        let lead_id = lead.id.ok_or(crate::repository::errors::RepositoryError::NotFound)?;

        let mut conn = self.conn()?;
        let changes: DbUpdateLead = lead.into();
        let updated = diesel::update(leads::table.find(lead_id))
            .set(&changes)
            .get_result::<DbLead>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_lead(&self, lead_id: i32) -> RepositoryResult<bool> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let removed = diesel::delete(leads::table.find(lead_id)).execute(&mut conn)?;

        Ok(removed > 0)
    }
}
