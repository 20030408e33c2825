//! Saved-filter repository for managing persisted task views.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewSavedFilter, SavedFilter, UpdateSavedFilter, User};
use crate::types::{OffsetPagination, SavedFilterSortBy, SavedFilterSortField, SortOrder};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for saved-filter database operations.
///
/// Mutations are owner-scoped: updates and deletes require both the filter
/// id and the owning user's id, so an id alone can never modify another
/// user's filter. Saved filters are hard-deleted; the record shape carries
/// no deletion marker.
pub trait SavedFilterRepository {
    /// Creates a new saved filter.
    ///
    /// The id and both timestamps are assigned by the database and returned
    /// on the inserted record.
    fn create_saved_filter(
        &mut self,
        filter: NewSavedFilter,
    ) -> impl Future<Output = PgResult<SavedFilter>> + Send;

    /// Finds a saved filter by ID.
    fn find_saved_filter_by_id(
        &mut self,
        filter_id: i64,
    ) -> impl Future<Output = PgResult<Option<SavedFilter>>> + Send;

    /// Finds a saved filter by ID, scoped to its owner.
    ///
    /// Returns `None` when the filter does not exist or belongs to another
    /// user; access-controlled paths should prefer this over
    /// [`find_saved_filter_by_id`](SavedFilterRepository::find_saved_filter_by_id).
    fn find_saved_filter_for_owner(
        &mut self,
        filter_id: i64,
        owner: i64,
    ) -> impl Future<Output = PgResult<Option<SavedFilter>>> + Send;

    /// Finds a saved filter together with its owning user.
    ///
    /// The owner is materialized by a join for presentation purposes; it is
    /// never stored on the filter record itself.
    fn find_saved_filter_with_owner(
        &mut self,
        filter_id: i64,
    ) -> impl Future<Output = PgResult<Option<(SavedFilter, User)>>> + Send;

    /// Lists a user's saved filters with sorting and pagination.
    fn list_saved_filters_by_owner(
        &mut self,
        owner: i64,
        sort: SavedFilterSortBy,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<Vec<SavedFilter>>> + Send;

    /// Counts a user's saved filters.
    fn count_saved_filters_by_owner(
        &mut self,
        owner: i64,
    ) -> impl Future<Output = PgResult<i64>> + Send;

    /// Searches a user's saved filters by title or description.
    ///
    /// Performs case-insensitive partial matching, most recently updated
    /// first.
    fn search_saved_filters(
        &mut self,
        owner: i64,
        search_query: &str,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<Vec<SavedFilter>>> + Send;

    /// Updates a saved filter with partial changes, scoped to its owner.
    ///
    /// `updated_at` is maintained by the database.
    fn update_saved_filter(
        &mut self,
        filter_id: i64,
        owner: i64,
        changes: UpdateSavedFilter,
    ) -> impl Future<Output = PgResult<SavedFilter>> + Send;

    /// Deletes a saved filter, scoped to its owner.
    ///
    /// Returns whether a record was deleted.
    fn delete_saved_filter(
        &mut self,
        filter_id: i64,
        owner: i64,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl SavedFilterRepository for PgConnection {
    async fn create_saved_filter(&mut self, filter: NewSavedFilter) -> PgResult<SavedFilter> {
        use schema::saved_filters;

        let filter = diesel::insert_into(saved_filters::table)
            .values(&filter)
            .returning(SavedFilter::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(filter)
    }

    async fn find_saved_filter_by_id(&mut self, filter_id: i64) -> PgResult<Option<SavedFilter>> {
        use schema::saved_filters::dsl::*;

        let filter = saved_filters
            .filter(id.eq(filter_id))
            .select(SavedFilter::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(filter)
    }

    async fn find_saved_filter_for_owner(
        &mut self,
        filter_id: i64,
        owner: i64,
    ) -> PgResult<Option<SavedFilter>> {
        use schema::saved_filters::dsl::*;

        let filter = saved_filters
            .filter(id.eq(filter_id))
            .filter(owner_id.eq(owner))
            .select(SavedFilter::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(filter)
    }

    async fn find_saved_filter_with_owner(
        &mut self,
        filter_id: i64,
    ) -> PgResult<Option<(SavedFilter, User)>> {
        use schema::{saved_filters, users};

        let result = saved_filters::table
            .inner_join(users::table)
            .filter(saved_filters::id.eq(filter_id))
            .select((SavedFilter::as_select(), User::as_select()))
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(result)
    }

    async fn list_saved_filters_by_owner(
        &mut self,
        owner: i64,
        sort: SavedFilterSortBy,
        pagination: OffsetPagination,
    ) -> PgResult<Vec<SavedFilter>> {
        use schema::saved_filters::dsl::*;

        let mut query = saved_filters.filter(owner_id.eq(owner)).into_boxed();

        query = match (sort.field, sort.order) {
            (SavedFilterSortField::Title, SortOrder::Asc) => query.order(title.asc()),
            (SavedFilterSortField::Title, SortOrder::Desc) => query.order(title.desc()),
            (SavedFilterSortField::Created, SortOrder::Asc) => query.order(created_at.asc()),
            (SavedFilterSortField::Created, SortOrder::Desc) => query.order(created_at.desc()),
            (SavedFilterSortField::Updated, SortOrder::Asc) => query.order(updated_at.asc()),
            (SavedFilterSortField::Updated, SortOrder::Desc) => query.order(updated_at.desc()),
        };

        let filter_list = query
            .select(SavedFilter::as_select())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(filter_list)
    }

    async fn count_saved_filters_by_owner(&mut self, owner: i64) -> PgResult<i64> {
        use schema::saved_filters::dsl::*;

        let count = saved_filters
            .filter(owner_id.eq(owner))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }

    async fn search_saved_filters(
        &mut self,
        owner: i64,
        search_query: &str,
        pagination: OffsetPagination,
    ) -> PgResult<Vec<SavedFilter>> {
        use schema::saved_filters::dsl::*;

        let search_pattern = format!("%{}%", search_query);

        let filter_list = saved_filters
            .filter(owner_id.eq(owner))
            .filter(diesel::BoolExpressionMethods::or(
                title.ilike(&search_pattern),
                description.ilike(&search_pattern),
            ))
            .select(SavedFilter::as_select())
            .order(updated_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(filter_list)
    }

    async fn update_saved_filter(
        &mut self,
        filter_id: i64,
        owner: i64,
        changes: UpdateSavedFilter,
    ) -> PgResult<SavedFilter> {
        use schema::saved_filters::dsl::*;

        let filter = diesel::update(saved_filters)
            .filter(id.eq(filter_id))
            .filter(owner_id.eq(owner))
            .set(&changes)
            .returning(SavedFilter::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(filter)
    }

    async fn delete_saved_filter(&mut self, filter_id: i64, owner: i64) -> PgResult<bool> {
        use schema::saved_filters::dsl::*;

        let deleted = diesel::delete(
            saved_filters
                .filter(id.eq(filter_id))
                .filter(owner_id.eq(owner)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
