//! Read-only aggregate views over cities and their readings.

use async_trait::async_trait;

use crate::domain::{CityId, Error};

/// Average reading of one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityAverage {
    pub name: String,
    pub average: f64,
}

/// Average reading across every city of a climate class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateAverage {
    pub average: f64,
}

/// One row of the joined state/city listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityListing {
    pub state: String,
    pub city: String,
    pub id: CityId,
}

/// Driving port for aggregate reads.
///
/// Aggregates never write, so adapters report failures directly as domain
/// errors.
#[async_trait]
pub trait AggregateQuery: Send + Sync {
    /// Mean of every reading for `city_id`; `None` when the city has none.
    async fn average_temperature_for_city(
        &self,
        city_id: CityId,
    ) -> Result<Option<CityAverage>, Error>;

    /// Mean of every reading for cities of `climate`; `None` when there are none.
    async fn average_temperature_for_climate(
        &self,
        climate: &str,
    ) -> Result<Option<ClimateAverage>, Error>;

    /// State name, city name, and city id for every city.
    async fn list_cities(&self) -> Result<Vec<CityListing>, Error>;
}
