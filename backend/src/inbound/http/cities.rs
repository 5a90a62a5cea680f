//! City HTTP handlers.
//!
//! `GET /cities` and `GET /cities/{id}` serve aggregate views rather than raw
//! records; the raw record is returned by create and update.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{CityAverage, CityListing};
use crate::domain::validation::validate_new_city;
use crate::domain::{City, CityId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payloads::UpdateFieldRequestBody;
use crate::inbound::http::schemas::{CreateCitySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// City record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "TX")]
    pub state_abbrev: String,
    #[schema(example = "Austin")]
    pub name: String,
    #[schema(example = "humid subtropical")]
    pub climate: String,
}

impl From<City> for CityBody {
    fn from(value: City) -> Self {
        Self {
            id: value.id().get(),
            state_abbrev: value.state_abbrev().to_owned(),
            name: value.name().to_owned(),
            climate: value.climate().to_owned(),
        }
    }
}

/// One row of the city listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityListingBody {
    #[schema(example = "Texas")]
    pub state: String,
    #[schema(example = "Austin")]
    pub city: String,
    #[schema(example = 1)]
    pub id: i32,
}

impl From<CityListing> for CityListingBody {
    fn from(value: CityListing) -> Self {
        Self {
            state: value.state,
            city: value.city,
            id: value.id.get(),
        }
    }
}

/// Average reading of one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CityAverageBody {
    #[schema(example = "Austin")]
    pub name: String,
    #[schema(example = 71.5)]
    pub average: f64,
}

impl From<CityAverage> for CityAverageBody {
    fn from(value: CityAverage) -> Self {
        Self {
            name: value.name,
            average: value.average,
        }
    }
}

/// List every city with its state's name.
#[utoipa::path(
    get,
    path = "/cities",
    responses(
        (status = 200, description = "All cities", body = [CityListingBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CityListingBody>>> {
    let listing = state.aggregates.list_cities().await?;
    Ok(web::Json(
        listing.into_iter().map(CityListingBody::from).collect(),
    ))
}

/// Average temperature of one city; `null` when it has no readings.
#[utoipa::path(
    get,
    path = "/cities/{id}",
    params(("id" = i32, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Average reading, or null", body = Option<CityAverageBody>),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "getCityAverage"
)]
#[get("/cities/{id}")]
pub async fn get_city_average(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Option<CityAverageBody>>> {
    let city_id = CityId::new(path.into_inner());
    let average = state.aggregates.average_temperature_for_city(city_id).await?;
    Ok(web::Json(average.map(CityAverageBody::from)))
}

/// Create a city in an existing state.
#[utoipa::path(
    post,
    path = "/cities",
    request_body = CreateCitySchema,
    responses(
        (status = 201, description = "City created", body = CityBody),
        (status = 400, description = "Invalid, duplicate, or orphaned city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "createCity"
)]
#[post("/cities")]
pub async fn create_city(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let draft = validate_new_city(&payload)?;
    let created = state.cities.create(&draft).await?;
    Ok(HttpResponse::Created().json(created.map(CityBody::from)))
}

/// Change one of `state_abbrev`, `name`, or `climate`.
#[utoipa::path(
    put,
    path = "/cities/{id}",
    params(("id" = i32, Path, description = "City identifier")),
    request_body = UpdateFieldRequestBody,
    responses(
        (status = 200, description = "Updated city", body = CityBody),
        (status = 400, description = "Unknown column or invalid value", body = ErrorSchema),
        (status = 404, description = "No such city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "updateCity"
)]
#[put("/cities/{id}")]
pub async fn update_city(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<CityBody>> {
    let city_id = CityId::new(path.into_inner());
    let update = UpdateFieldRequestBody::from_value(payload.into_inner()).into_field_update();
    let updated = state.cities.partial_update(&city_id, &update).await?;
    Ok(web::Json(updated.into()))
}

/// Delete a city together with its readings.
#[utoipa::path(
    delete,
    path = "/cities/{id}",
    params(("id" = i32, Path, description = "City identifier")),
    responses(
        (status = 204, description = "City removed or already absent"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "deleteCity"
)]
#[delete("/cities/{id}")]
pub async fn delete_city(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.cities.delete(&CityId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "cities_tests.rs"]
mod tests;
