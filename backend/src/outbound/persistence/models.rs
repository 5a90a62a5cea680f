//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; adapters convert them to domain
//! records before returning.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{City, CityId, State, Temperature, TemperatureId};

use super::schema::{cities, states, temperatures};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StateRow {
    pub abbrev: String,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = states)]
pub(crate) struct NewStateRow<'a> {
    pub abbrev: &'a str,
    pub name: &'a str,
}

impl From<StateRow> for State {
    fn from(row: StateRow) -> Self {
        State::new(row.abbrev, row.name)
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub id: i32,
    pub state_abbrev: String,
    pub name: String,
    pub climate: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cities)]
pub(crate) struct NewCityRow<'a> {
    pub state_abbrev: &'a str,
    pub name: &'a str,
    pub climate: &'a str,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City::new(CityId::new(row.id), row.state_abbrev, row.name, row.climate)
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = temperatures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemperatureRow {
    pub id: i32,
    pub city_id: i32,
    pub temperature: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = temperatures)]
pub(crate) struct NewTemperatureRow {
    pub city_id: i32,
    pub temperature: i32,
    pub date: NaiveDate,
}

impl From<TemperatureRow> for Temperature {
    fn from(row: TemperatureRow) -> Self {
        Temperature::new(
            TemperatureId::new(row.id),
            CityId::new(row.city_id),
            row.temperature,
            row.date,
        )
    }
}
