//! Temperature readings.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::resource::{FieldUpdate, Resource, ResourceKind, unknown_field};
use super::validation::{CITY_ID, DATE, TEMPERATURE, require_date, require_nonzero_integer};
use super::{CityId, Error};

/// Serial identifier of a temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemperatureId(i32);

impl TemperatureId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for TemperatureId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TemperatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dated integer observation for a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temperature {
    id: TemperatureId,
    city_id: CityId,
    temperature: i32,
    date: NaiveDate,
}

impl Temperature {
    pub fn new(id: TemperatureId, city_id: CityId, temperature: i32, date: NaiveDate) -> Self {
        Self {
            id,
            city_id,
            temperature,
            date,
        }
    }

    pub fn id(&self) -> TemperatureId {
        self.id
    }

    pub fn city_id(&self) -> CityId {
        self.city_id
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Validated temperature insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemperature {
    pub city_id: CityId,
    pub temperature: i32,
    pub date: NaiveDate,
}

/// Mutable temperature columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemperatureChange {
    CityId(CityId),
    Temperature(i32),
    Date(NaiveDate),
}

impl Resource for Temperature {
    type Key = TemperatureId;
    type Draft = NewTemperature;
    type Change = TemperatureChange;

    const KIND: ResourceKind = ResourceKind::Temperature;
    const MUTABLE_FIELDS: &'static [&'static str] = &["city_id", "temperature", "date"];

    fn key(&self) -> TemperatureId {
        self.id
    }

    fn parse_change(update: &FieldUpdate) -> Result<TemperatureChange, Error> {
        let value = Some(update.change());
        match update.column() {
            "city_id" => require_nonzero_integer(value, CITY_ID)
                .map(|id| TemperatureChange::CityId(CityId::new(id))),
            "temperature" => {
                require_nonzero_integer(value, TEMPERATURE).map(TemperatureChange::Temperature)
            }
            "date" => require_date(value, DATE).map(TemperatureChange::Date),
            other => Err(unknown_field::<Self>(other)),
        }
    }
}
