//! PostgreSQL-backed city repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{City, CityChange, CityId, NewCity};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CityRow, NewCityRow};
use super::pool::DbPool;
use super::schema::cities;

/// Diesel-backed implementation of the city repository port.
#[derive(Clone)]
pub struct DieselCityRepository {
    pool: DbPool,
}

impl DieselCityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<City> for DieselCityRepository {
    async fn list(&self) -> Result<Vec<City>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CityRow> = cities::table
            .select(CityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn find_by_key(&self, id: &CityId) -> Result<Option<City>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = cities::table
            .find(id.get())
            .select(CityRow::as_select())
            .first::<CityRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(City::from))
    }

    async fn insert(&self, draft: &NewCity) -> Result<CityId, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(cities::table)
            .values(&NewCityRow {
                state_abbrev: draft.state_abbrev.as_str(),
                name: draft.name.as_str(),
                climate: draft.climate.as_str(),
            })
            .returning(cities::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(CityId::new)
            .map_err(map_diesel_error)
    }

    async fn update_field(
        &self,
        id: &CityId,
        change: &CityChange,
    ) -> Result<Option<CityId>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = cities::table.find(id.get());

        let updated = match change {
            CityChange::StateAbbrev(state_abbrev) => {
                diesel::update(target)
                    .set(cities::state_abbrev.eq(state_abbrev))
                    .returning(cities::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
            CityChange::Name(name) => {
                diesel::update(target)
                    .set(cities::name.eq(name))
                    .returning(cities::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
            CityChange::Climate(climate) => {
                diesel::update(target)
                    .set(cities::climate.eq(climate))
                    .returning(cities::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
        };

        updated
            .optional()
            .map(|id| id.map(CityId::new))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &CityId) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(cities::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
