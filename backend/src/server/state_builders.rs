//! Builders wiring Diesel adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use weather::inbound::http::state::{HttpState, HttpStatePorts};
use weather::outbound::persistence::{
    DbPool, DieselAggregateQuery, DieselCityRepository, DieselStateRepository,
    DieselTemperatureRepository,
};

/// Every port is backed by the shared pool.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(HttpStatePorts {
        states: Arc::new(DieselStateRepository::new(pool.clone())),
        cities: Arc::new(DieselCityRepository::new(pool.clone())),
        temperatures: Arc::new(DieselTemperatureRepository::new(pool.clone())),
        aggregates: Arc::new(DieselAggregateQuery::new(pool.clone())),
    }))
}
