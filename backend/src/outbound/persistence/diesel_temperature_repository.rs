//! PostgreSQL-backed temperature reading repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{NewTemperature, Temperature, TemperatureChange, TemperatureId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTemperatureRow, TemperatureRow};
use super::pool::DbPool;
use super::schema::temperatures;

/// Diesel-backed implementation of the temperature repository port.
#[derive(Clone)]
pub struct DieselTemperatureRepository {
    pool: DbPool,
}

impl DieselTemperatureRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<Temperature> for DieselTemperatureRepository {
    async fn list(&self) -> Result<Vec<Temperature>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TemperatureRow> = temperatures::table
            .select(TemperatureRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Temperature::from).collect())
    }

    async fn find_by_key(
        &self,
        id: &TemperatureId,
    ) -> Result<Option<Temperature>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = temperatures::table
            .find(id.get())
            .select(TemperatureRow::as_select())
            .first::<TemperatureRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Temperature::from))
    }

    async fn insert(&self, draft: &NewTemperature) -> Result<TemperatureId, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(temperatures::table)
            .values(&NewTemperatureRow {
                city_id: draft.city_id.get(),
                temperature: draft.temperature,
                date: draft.date,
            })
            .returning(temperatures::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(TemperatureId::new)
            .map_err(map_diesel_error)
    }

    async fn update_field(
        &self,
        id: &TemperatureId,
        change: &TemperatureChange,
    ) -> Result<Option<TemperatureId>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = temperatures::table.find(id.get());

        let updated = match change {
            TemperatureChange::CityId(city_id) => {
                diesel::update(target)
                    .set(temperatures::city_id.eq(city_id.get()))
                    .returning(temperatures::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
            TemperatureChange::Temperature(temperature) => {
                diesel::update(target)
                    .set(temperatures::temperature.eq(*temperature))
                    .returning(temperatures::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
            TemperatureChange::Date(date) => {
                diesel::update(target)
                    .set(temperatures::date.eq(*date))
                    .returning(temperatures::id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
        };

        updated
            .optional()
            .map(|id| id.map(TemperatureId::new))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &TemperatureId) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(temperatures::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
