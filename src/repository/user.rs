use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, UserReader, UserWriter, VerificationToken, VerificationTokenStore,
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .find(id)
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(TryInto::try_into).transpose().map_err(Into::into)
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(TryInto::try_into).transpose().map_err(Into::into)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &User) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable: DbNewUser = user.into();
        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn mark_email_verified(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        diesel::update(users::table.find(user_id))
            .set(users::email_verified_at.eq(chrono::Utc::now().naive_utc()))
            .execute(&mut conn)?;

        Ok(())
    }
}

impl VerificationTokenStore for DieselRepository {
    fn store_token(
        &self,
        user_id: i32,
        token: &str,
        expires_at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        use crate::models::user::EmailVerificationToken;
        use crate::schema::email_verification_tokens as tokens;

        let mut conn = self.conn()?;
        let row = EmailVerificationToken {
            user_id,
            token: token.to_string(),
            expires_at,
        };

        // One outstanding token per user; a resend replaces the old one.
        diesel::insert_into(tokens::table)
            .values(&row)
            .on_conflict(tokens::user_id)
            .do_update()
            .set((
                tokens::token.eq(&row.token),
                tokens::expires_at.eq(row.expires_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn get_token(&self, user_id: i32) -> RepositoryResult<Option<VerificationToken>> {
        use crate::models::user::EmailVerificationToken;
        use crate::schema::email_verification_tokens as tokens;

        let mut conn = self.conn()?;
        let row = tokens::table
            .find(user_id)
            .first::<EmailVerificationToken>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn remove_token(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::email_verification_tokens as tokens;

        let mut conn = self.conn()?;
        diesel::delete(tokens::table.find(user_id)).execute(&mut conn)?;

        Ok(())
    }
}
