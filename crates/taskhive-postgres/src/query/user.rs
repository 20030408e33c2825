//! User repository for managing account records.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewUser, UpdateUser, User};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for user database operations.
///
/// Users own saved filters; deleting a user cascades to their filters.
pub trait UserRepository {
    /// Creates a new user.
    fn create_user(&mut self, user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by ID.
    fn find_user_by_id(
        &mut self,
        user_id: i64,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by their unique username.
    fn find_user_by_username(
        &mut self,
        name: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Updates a user with partial changes.
    fn update_user(
        &mut self,
        user_id: i64,
        changes: UpdateUser,
    ) -> impl Future<Output = PgResult<User>> + Send;

    /// Deletes a user.
    ///
    /// The user's saved filters are removed by the database through the
    /// owner foreign key. Returns whether a record was deleted.
    fn delete_user(&mut self, user_id: i64) -> impl Future<Output = PgResult<bool>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, user: NewUser) -> PgResult<User> {
        use schema::users;

        let user = diesel::insert_into(users::table)
            .values(&user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn find_user_by_id(&mut self, user_id: i64) -> PgResult<Option<User>> {
        use schema::users::dsl::*;

        let user = users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn find_user_by_username(&mut self, name: &str) -> PgResult<Option<User>> {
        use schema::users::dsl::*;

        let user = users
            .filter(username.eq(name))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn update_user(&mut self, user_id: i64, changes: UpdateUser) -> PgResult<User> {
        use schema::users::dsl::*;

        let user = diesel::update(users)
            .filter(id.eq(user_id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(user)
    }

    async fn delete_user(&mut self, user_id: i64) -> PgResult<bool> {
        use schema::users::dsl::*;

        let deleted = diesel::delete(users.filter(id.eq(user_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
