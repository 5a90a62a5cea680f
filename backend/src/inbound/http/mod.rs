//! HTTP inbound adapter exposing the weather REST endpoints.

pub mod cities;
pub mod error;
pub mod extractors;
pub mod health;
pub mod payloads;
pub mod schemas;
pub mod state;
pub mod states;
pub mod temperatures;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the resource endpoints and their extractor settings.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than [`state::HttpState`].
pub fn configure_resources(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extractors::json_config())
        .app_data(extractors::path_config())
        .service(states::list_states)
        .service(states::get_state)
        .service(states::create_state)
        .service(states::update_state)
        .service(states::delete_state)
        .service(cities::list_cities)
        .service(cities::get_city_average)
        .service(cities::create_city)
        .service(cities::update_city)
        .service(cities::delete_city)
        .service(temperatures::get_climate_average)
        .service(temperatures::list_temperatures)
        .service(temperatures::get_temperature)
        .service(temperatures::create_temperature)
        .service(temperatures::update_temperature)
        .service(temperatures::delete_temperature);
}
