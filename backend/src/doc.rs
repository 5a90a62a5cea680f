//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every resource and health endpoint plus the schema
//! wrappers from `inbound::http::schemas`. The document backs Swagger UI in
//! debug builds and is printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::cities::{CityAverageBody, CityBody, CityListingBody};
use crate::inbound::http::payloads::UpdateFieldRequestBody;
use crate::inbound::http::schemas::{
    CreateCitySchema, CreateStateSchema, CreateTemperatureSchema, ErrorCodeSchema, ErrorSchema,
};
use crate::inbound::http::states::StateBody;
use crate::inbound::http::temperatures::{ClimateAverageBody, TemperatureBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather reference API",
        description = "States, cities, and dated temperature readings with per-city and per-climate averages."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::states::list_states,
        crate::inbound::http::states::get_state,
        crate::inbound::http::states::create_state,
        crate::inbound::http::states::update_state,
        crate::inbound::http::states::delete_state,
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::get_city_average,
        crate::inbound::http::cities::create_city,
        crate::inbound::http::cities::update_city,
        crate::inbound::http::cities::delete_city,
        crate::inbound::http::temperatures::get_climate_average,
        crate::inbound::http::temperatures::list_temperatures,
        crate::inbound::http::temperatures::get_temperature,
        crate::inbound::http::temperatures::create_temperature,
        crate::inbound::http::temperatures::update_temperature,
        crate::inbound::http::temperatures::delete_temperature,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StateBody,
        CityBody,
        CityListingBody,
        CityAverageBody,
        TemperatureBody,
        ClimateAverageBody,
        UpdateFieldRequestBody,
        CreateStateSchema,
        CreateCitySchema,
        CreateTemperatureSchema,
    )),
    tags(
        (name = "states", description = "State records"),
        (name = "cities", description = "City records and per-city averages"),
        (name = "temperatures", description = "Temperature readings and per-climate averages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(error))) = schemas.get(ERROR_SCHEMA_NAME) else {
            panic!("expected Error object schema");
        };

        assert!(error.properties.contains_key("code"));
        assert!(error.properties.contains_key("message"));
    }

    #[rstest]
    #[case("/states")]
    #[case("/states/{abbrev}")]
    #[case("/cities/{id}")]
    #[case("/temperature/{climate}")]
    #[case("/temperatures/{id}")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
