//! City records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::resource::{FieldUpdate, Resource, ResourceKind, unknown_field};
use super::validation::{CLIMATE, NAME, STATE_ABBREV, require_text};
use super::Error;

/// Serial identifier of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(i32);

impl CityId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for CityId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Municipality belonging to one state, classified by climate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    id: CityId,
    state_abbrev: String,
    name: String,
    climate: String,
}

impl City {
    pub fn new(
        id: CityId,
        state_abbrev: impl Into<String>,
        name: impl Into<String>,
        climate: impl Into<String>,
    ) -> Self {
        Self {
            id,
            state_abbrev: state_abbrev.into(),
            name: name.into(),
            climate: climate.into(),
        }
    }

    pub fn id(&self) -> CityId {
        self.id
    }

    pub fn state_abbrev(&self) -> &str {
        self.state_abbrev.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn climate(&self) -> &str {
        self.climate.as_str()
    }
}

/// Validated city insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCity {
    pub state_abbrev: String,
    pub name: String,
    pub climate: String,
}

/// Mutable city columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityChange {
    StateAbbrev(String),
    Name(String),
    Climate(String),
}

impl Resource for City {
    type Key = CityId;
    type Draft = NewCity;
    type Change = CityChange;

    const KIND: ResourceKind = ResourceKind::City;
    const MUTABLE_FIELDS: &'static [&'static str] = &["state_abbrev", "name", "climate"];

    fn key(&self) -> CityId {
        self.id
    }

    fn parse_change(update: &FieldUpdate) -> Result<CityChange, Error> {
        let value = Some(update.change());
        match update.column() {
            "state_abbrev" => require_text(value, STATE_ABBREV).map(CityChange::StateAbbrev),
            "name" => require_text(value, NAME).map(CityChange::Name),
            "climate" => require_text(value, CLIMATE).map(CityChange::Climate),
            other => Err(unknown_field::<Self>(other)),
        }
    }
}
