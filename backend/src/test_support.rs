//! Test utilities for the weather crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{
    AggregateQuery, CityAverage, CityListing, ClimateAverage, ResourceRepository,
    ResourceRepositoryError,
};
use crate::domain::{
    City, CityChange, CityId, Error, KnownConstraint, NewCity, NewState, NewTemperature, State,
    StateChange, Temperature, TemperatureChange, TemperatureId,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

#[derive(Debug, Default)]
struct Tables {
    states: BTreeMap<String, State>,
    cities: BTreeMap<CityId, City>,
    temperatures: BTreeMap<TemperatureId, Temperature>,
    last_city_id: i32,
    last_temperature_id: i32,
    failure: Option<ResourceRepositoryError>,
    vanish_after_write: bool,
}

impl Tables {
    fn check_failure(&self) -> Result<(), ResourceRepositoryError> {
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn check_city_row(
        &self,
        id: Option<CityId>,
        state_abbrev: &str,
        name: &str,
    ) -> Result<(), ResourceRepositoryError> {
        if !self.states.contains_key(state_abbrev) {
            return Err(violation(KnownConstraint::CityStateReference));
        }
        let duplicate = self.cities.values().any(|city| {
            Some(city.id()) != id && city.state_abbrev() == state_abbrev && city.name() == name
        });
        if duplicate {
            return Err(violation(KnownConstraint::CityStateName));
        }
        Ok(())
    }

    fn check_temperature_row(
        &self,
        id: Option<TemperatureId>,
        city_id: CityId,
        date: NaiveDate,
    ) -> Result<(), ResourceRepositoryError> {
        if !self.cities.contains_key(&city_id) {
            return Err(violation(KnownConstraint::TemperatureCityReference));
        }
        let duplicate = self.temperatures.values().any(|reading| {
            Some(reading.id()) != id && reading.city_id() == city_id && reading.date() == date
        });
        if duplicate {
            return Err(violation(KnownConstraint::CityDate));
        }
        Ok(())
    }

    fn remove_city(&mut self, id: CityId) {
        self.cities.remove(&id);
        self.temperatures.retain(|_, reading| reading.city_id() != id);
    }
}

fn violation(constraint: KnownConstraint) -> ResourceRepositoryError {
    ResourceRepositoryError::constraint_violation(constraint.name())
}

/// In-memory store implementing every storage port.
///
/// Enforces the same named uniqueness and reference constraints as the
/// PostgreSQL schema and cascades deletes to dependents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWeatherStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryWeatherStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call fail with `failure`.
    pub fn fail_with(&self, failure: ResourceRepositoryError) {
        self.tables().failure = Some(failure);
    }

    /// Simulate a concurrent delete landing between a write and its read-back.
    pub fn vanish_after_write(&self) {
        self.tables().vanish_after_write = true;
    }

    /// Store a state without constraint checks.
    pub fn seed_state(&self, abbrev: &str, name: &str) -> State {
        let state = State::new(abbrev, name);
        self.tables().states.insert(abbrev.to_owned(), state.clone());
        state
    }

    /// Store a city without constraint checks.
    pub fn seed_city(&self, state_abbrev: &str, name: &str, climate: &str) -> City {
        let mut tables = self.tables();
        tables.last_city_id += 1;
        let city = City::new(CityId::new(tables.last_city_id), state_abbrev, name, climate);
        tables.cities.insert(city.id(), city.clone());
        city
    }

    /// Store a reading without constraint checks.
    pub fn seed_temperature(&self, city_id: CityId, temperature: i32, date: NaiveDate) -> Temperature {
        let mut tables = self.tables();
        tables.last_temperature_id += 1;
        let reading = Temperature::new(
            TemperatureId::new(tables.last_temperature_id),
            city_id,
            temperature,
            date,
        );
        tables.temperatures.insert(reading.id(), reading.clone());
        reading
    }

    pub fn states(&self) -> Vec<State> {
        self.tables().states.values().cloned().collect()
    }

    pub fn cities(&self) -> Vec<City> {
        self.tables().cities.values().cloned().collect()
    }

    pub fn temperatures(&self) -> Vec<Temperature> {
        self.tables().temperatures.values().cloned().collect()
    }

    /// Port bundle backed entirely by this store.
    pub fn ports(&self) -> HttpStatePorts {
        HttpStatePorts {
            states: Arc::new(self.clone()),
            cities: Arc::new(self.clone()),
            temperatures: Arc::new(self.clone()),
            aggregates: Arc::new(self.clone()),
        }
    }

    /// Handler state backed entirely by this store.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(self.ports())
    }
}

#[async_trait]
impl ResourceRepository<State> for InMemoryWeatherStore {
    async fn list(&self) -> Result<Vec<State>, ResourceRepositoryError> {
        let tables = self.tables();
        tables.check_failure()?;
        Ok(tables.states.values().cloned().collect())
    }

    async fn find_by_key(&self, key: &String) -> Result<Option<State>, ResourceRepositoryError> {
        let tables = self.tables();
        tables.check_failure()?;
        Ok(tables.states.get(key).cloned())
    }

    async fn insert(&self, draft: &NewState) -> Result<String, ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        if tables.states.contains_key(&draft.abbrev) {
            return Err(violation(KnownConstraint::StatePrimaryKey));
        }
        if !tables.vanish_after_write {
            tables.states.insert(
                draft.abbrev.clone(),
                State::new(draft.abbrev.as_str(), draft.name.as_str()),
            );
        }
        Ok(draft.abbrev.clone())
    }

    async fn update_field(
        &self,
        key: &String,
        change: &StateChange,
    ) -> Result<Option<String>, ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        let Some(current) = tables.states.get(key).cloned() else {
            return Ok(None);
        };
        let updated = match change {
            StateChange::Name(name) => State::new(current.abbrev(), name.as_str()),
        };
        if tables.vanish_after_write {
            tables.states.remove(key);
        } else {
            tables.states.insert(key.clone(), updated);
        }
        Ok(Some(key.clone()))
    }

    async fn delete(&self, key: &String) -> Result<(), ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        tables.states.remove(key);
        let orphaned: Vec<CityId> = tables
            .cities
            .values()
            .filter(|city| city.state_abbrev() == key.as_str())
            .map(City::id)
            .collect();
        for id in orphaned {
            tables.remove_city(id);
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceRepository<City> for InMemoryWeatherStore {
    async fn list(&self) -> Result<Vec<City>, ResourceRepositoryError> {
        let tables = self.tables();
        tables.check_failure()?;
        Ok(tables.cities.values().cloned().collect())
    }

    async fn find_by_key(&self, key: &CityId) -> Result<Option<City>, ResourceRepositoryError> {
        let tables = self.tables();
        tables.check_failure()?;
        Ok(tables.cities.get(key).cloned())
    }

    async fn insert(&self, draft: &NewCity) -> Result<CityId, ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        tables.check_city_row(None, &draft.state_abbrev, &draft.name)?;
        tables.last_city_id += 1;
        let id = CityId::new(tables.last_city_id);
        if !tables.vanish_after_write {
            let city = City::new(
                id,
                draft.state_abbrev.as_str(),
                draft.name.as_str(),
                draft.climate.as_str(),
            );
            tables.cities.insert(id, city);
        }
        Ok(id)
    }

    async fn update_field(
        &self,
        key: &CityId,
        change: &CityChange,
    ) -> Result<Option<CityId>, ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        let Some(current) = tables.cities.get(key).cloned() else {
            return Ok(None);
        };
        let (state_abbrev, name, climate) = match change {
            CityChange::StateAbbrev(value) => (value.as_str(), current.name(), current.climate()),
            CityChange::Name(value) => (current.state_abbrev(), value.as_str(), current.climate()),
            CityChange::Climate(value) => (current.state_abbrev(), current.name(), value.as_str()),
        };
        tables.check_city_row(Some(*key), state_abbrev, name)?;
        let updated = City::new(*key, state_abbrev, name, climate);
        if tables.vanish_after_write {
            tables.remove_city(*key);
        } else {
            tables.cities.insert(*key, updated);
        }
        Ok(Some(*key))
    }

    async fn delete(&self, key: &CityId) -> Result<(), ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        tables.remove_city(*key);
        Ok(())
    }
}

#[async_trait]
impl ResourceRepository<Temperature> for InMemoryWeatherStore {
    async fn list(&self) -> Result<Vec<Temperature>, ResourceRepositoryError> {
        let tables = self.tables();
        tables.check_failure()?;
        Ok(tables.temperatures.values().cloned().collect())
    }

    async fn find_by_key(
        &self,
        key: &TemperatureId,
    ) -> Result<Option<Temperature>, ResourceRepositoryError> {
        let tables = self.tables();
        tables.check_failure()?;
        Ok(tables.temperatures.get(key).cloned())
    }

    async fn insert(&self, draft: &NewTemperature) -> Result<TemperatureId, ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        tables.check_temperature_row(None, draft.city_id, draft.date)?;
        tables.last_temperature_id += 1;
        let id = TemperatureId::new(tables.last_temperature_id);
        if !tables.vanish_after_write {
            let reading = Temperature::new(id, draft.city_id, draft.temperature, draft.date);
            tables.temperatures.insert(id, reading);
        }
        Ok(id)
    }

    async fn update_field(
        &self,
        key: &TemperatureId,
        change: &TemperatureChange,
    ) -> Result<Option<TemperatureId>, ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        let Some(current) = tables.temperatures.get(key).cloned() else {
            return Ok(None);
        };
        let (city_id, temperature, date) = match change {
            TemperatureChange::CityId(value) => (*value, current.temperature(), current.date()),
            TemperatureChange::Temperature(value) => (current.city_id(), *value, current.date()),
            TemperatureChange::Date(value) => (current.city_id(), current.temperature(), *value),
        };
        tables.check_temperature_row(Some(*key), city_id, date)?;
        if tables.vanish_after_write {
            tables.temperatures.remove(key);
        } else {
            tables
                .temperatures
                .insert(*key, Temperature::new(*key, city_id, temperature, date));
        }
        Ok(Some(*key))
    }

    async fn delete(&self, key: &TemperatureId) -> Result<(), ResourceRepositoryError> {
        let mut tables = self.tables();
        tables.check_failure()?;
        tables.temperatures.remove(key);
        Ok(())
    }
}

fn mean(readings: &[i32]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let total: i64 = readings.iter().map(|value| i64::from(*value)).sum();
    Some(total as f64 / readings.len() as f64)
}

#[async_trait]
impl AggregateQuery for InMemoryWeatherStore {
    async fn average_temperature_for_city(
        &self,
        city_id: CityId,
    ) -> Result<Option<CityAverage>, Error> {
        let tables = self.tables();
        if tables.failure.is_some() {
            return Err(Error::internal("aggregate query failed"));
        }
        let Some(city) = tables.cities.get(&city_id) else {
            return Ok(None);
        };
        let readings: Vec<i32> = tables
            .temperatures
            .values()
            .filter(|reading| reading.city_id() == city_id)
            .map(Temperature::temperature)
            .collect();
        Ok(mean(&readings).map(|average| CityAverage {
            name: city.name().to_owned(),
            average,
        }))
    }

    async fn average_temperature_for_climate(
        &self,
        climate: &str,
    ) -> Result<Option<ClimateAverage>, Error> {
        let tables = self.tables();
        if tables.failure.is_some() {
            return Err(Error::internal("aggregate query failed"));
        }
        let readings: Vec<i32> = tables
            .temperatures
            .values()
            .filter(|reading| {
                tables
                    .cities
                    .get(&reading.city_id())
                    .is_some_and(|city| city.climate() == climate)
            })
            .map(Temperature::temperature)
            .collect();
        Ok(mean(&readings).map(|average| ClimateAverage { average }))
    }

    async fn list_cities(&self) -> Result<Vec<CityListing>, Error> {
        let tables = self.tables();
        if tables.failure.is_some() {
            return Err(Error::internal("aggregate query failed"));
        }
        Ok(tables
            .cities
            .values()
            .filter_map(|city| {
                tables.states.get(city.state_abbrev()).map(|state| CityListing {
                    state: state.name().to_owned(),
                    city: city.name().to_owned(),
                    id: city.id(),
                })
            })
            .collect())
    }
}
