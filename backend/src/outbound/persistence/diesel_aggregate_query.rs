//! PostgreSQL-backed aggregate views.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Double, Integer, Nullable, Text};
use diesel_async::RunQueryDsl;
use tracing::error;

use crate::domain::ports::{
    AggregateQuery, CityAverage, CityListing, ClimateAverage, ResourceRepositoryError,
};
use crate::domain::{CityId, Error};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{cities, states};

const CITY_AVERAGE_SQL: &str = "\
    SELECT cities.name AS name, avg(temperatures.temperature)::float8 AS average \
    FROM cities \
    JOIN temperatures ON temperatures.city_id = cities.id \
    WHERE cities.id = $1 \
    GROUP BY cities.id, cities.name";

const CLIMATE_AVERAGE_SQL: &str = "\
    SELECT avg(temperatures.temperature)::float8 AS average \
    FROM temperatures \
    JOIN cities ON cities.id = temperatures.city_id \
    WHERE cities.climate = $1";

#[derive(Debug, QueryableByName)]
struct CityAverageRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Double)]
    average: f64,
}

#[derive(Debug, QueryableByName)]
struct ClimateAverageRow {
    #[diesel(sql_type = Nullable<Double>)]
    average: Option<f64>,
}

/// Diesel-backed implementation of the aggregate query port.
#[derive(Clone)]
pub struct DieselAggregateQuery {
    pool: DbPool,
}

impl DieselAggregateQuery {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_failed(operation: &'static str, failure: ResourceRepositoryError) -> Error {
    error!(operation, error = %failure, "aggregate query failed");
    Error::internal(failure.to_string())
}

#[async_trait]
impl AggregateQuery for DieselAggregateQuery {
    async fn average_temperature_for_city(
        &self,
        city_id: CityId,
    ) -> Result<Option<CityAverage>, Error> {
        const OPERATION: &str = "average_temperature_for_city";
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| query_failed(OPERATION, map_pool_error(err)))?;

        let row = sql_query(CITY_AVERAGE_SQL)
            .bind::<Integer, _>(city_id.get())
            .get_result::<CityAverageRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| query_failed(OPERATION, map_diesel_error(err)))?;

        Ok(row.map(|row| CityAverage {
            name: row.name,
            average: row.average,
        }))
    }

    async fn average_temperature_for_climate(
        &self,
        climate: &str,
    ) -> Result<Option<ClimateAverage>, Error> {
        const OPERATION: &str = "average_temperature_for_climate";
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| query_failed(OPERATION, map_pool_error(err)))?;

        let row = sql_query(CLIMATE_AVERAGE_SQL)
            .bind::<Text, _>(climate)
            .get_result::<ClimateAverageRow>(&mut conn)
            .await
            .map_err(|err| query_failed(OPERATION, map_diesel_error(err)))?;

        Ok(row.average.map(|average| ClimateAverage { average }))
    }

    async fn list_cities(&self) -> Result<Vec<CityListing>, Error> {
        const OPERATION: &str = "list_cities";
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| query_failed(OPERATION, map_pool_error(err)))?;

        let rows: Vec<(String, String, i32)> = cities::table
            .inner_join(states::table)
            .select((states::name, cities::name, cities::id))
            .load(&mut conn)
            .await
            .map_err(|err| query_failed(OPERATION, map_diesel_error(err)))?;

        Ok(rows
            .into_iter()
            .map(|(state, city, id)| CityListing {
                state,
                city,
                id: CityId::new(id),
            })
            .collect())
    }
}
