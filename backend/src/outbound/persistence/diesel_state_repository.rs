//! PostgreSQL-backed state repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{NewState, State, StateChange};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStateRow, StateRow};
use super::pool::DbPool;
use super::schema::states;

/// Diesel-backed implementation of the state repository port.
#[derive(Clone)]
pub struct DieselStateRepository {
    pool: DbPool,
}

impl DieselStateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<State> for DieselStateRepository {
    async fn list(&self) -> Result<Vec<State>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StateRow> = states::table
            .select(StateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(State::from).collect())
    }

    async fn find_by_key(&self, abbrev: &String) -> Result<Option<State>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = states::table
            .find(abbrev.as_str())
            .select(StateRow::as_select())
            .first::<StateRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(State::from))
    }

    async fn insert(&self, draft: &NewState) -> Result<String, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(states::table)
            .values(&NewStateRow {
                abbrev: draft.abbrev.as_str(),
                name: draft.name.as_str(),
            })
            .returning(states::abbrev)
            .get_result::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update_field(
        &self,
        abbrev: &String,
        change: &StateChange,
    ) -> Result<Option<String>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = states::table.find(abbrev.as_str());

        match change {
            StateChange::Name(name) => diesel::update(target)
                .set(states::name.eq(name))
                .returning(states::abbrev)
                .get_result::<String>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error),
        }
    }

    async fn delete(&self, abbrev: &String) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(states::table.find(abbrev.as_str()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
