//! Temperature reading HTTP handlers, plus the per-climate average.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::ClimateAverage;
use crate::domain::validation::validate_new_temperature;
use crate::domain::{Resource, Temperature, TemperatureId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payloads::UpdateFieldRequestBody;
use crate::inbound::http::schemas::{CreateTemperatureSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Temperature reading as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub city_id: i32,
    #[schema(example = 72)]
    pub temperature: i32,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub date: NaiveDate,
}

impl From<Temperature> for TemperatureBody {
    fn from(value: Temperature) -> Self {
        Self {
            id: value.id().get(),
            city_id: value.city_id().get(),
            temperature: value.temperature(),
            date: value.date(),
        }
    }
}

/// Average reading across a climate class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClimateAverageBody {
    #[schema(example = 64.25)]
    pub average: f64,
}

impl From<ClimateAverage> for ClimateAverageBody {
    fn from(value: ClimateAverage) -> Self {
        Self {
            average: value.average,
        }
    }
}

/// Average temperature across every city of a climate; `null` without readings.
#[utoipa::path(
    get,
    path = "/temperature/{climate}",
    params(("climate" = String, Path, description = "Climate class")),
    responses(
        (status = 200, description = "Average reading, or null", body = Option<ClimateAverageBody>),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["temperatures"],
    operation_id = "getClimateAverage"
)]
#[get("/temperature/{climate}")]
pub async fn get_climate_average(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<ClimateAverageBody>>> {
    let climate = path.into_inner();
    let average = state
        .aggregates
        .average_temperature_for_climate(&climate)
        .await?;
    Ok(web::Json(average.map(ClimateAverageBody::from)))
}

/// List every reading.
#[utoipa::path(
    get,
    path = "/temperatures",
    responses(
        (status = 200, description = "All readings", body = [TemperatureBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["temperatures"],
    operation_id = "listTemperatures"
)]
#[get("/temperatures")]
pub async fn list_temperatures(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TemperatureBody>>> {
    let readings = state.temperatures.list().await?;
    Ok(web::Json(
        readings.into_iter().map(TemperatureBody::from).collect(),
    ))
}

/// Fetch one reading.
#[utoipa::path(
    get,
    path = "/temperatures/{id}",
    params(("id" = i32, Path, description = "Reading identifier")),
    responses(
        (status = 200, description = "The reading", body = TemperatureBody),
        (status = 404, description = "No such reading", body = ErrorSchema)
    ),
    tags = ["temperatures"],
    operation_id = "getTemperature"
)]
#[get("/temperatures/{id}")]
pub async fn get_temperature(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TemperatureBody>> {
    let id = TemperatureId::new(path.into_inner());
    state
        .temperatures
        .get_by_key(&id)
        .await?
        .map(|found| web::Json(TemperatureBody::from(found)))
        .ok_or_else(|| Temperature::KIND.not_found())
}

/// Record a reading for an existing city.
#[utoipa::path(
    post,
    path = "/temperatures",
    request_body = CreateTemperatureSchema,
    responses(
        (status = 201, description = "Reading recorded", body = TemperatureBody),
        (status = 400, description = "Invalid, duplicate, or orphaned reading", body = ErrorSchema)
    ),
    tags = ["temperatures"],
    operation_id = "createTemperature"
)]
#[post("/temperatures")]
pub async fn create_temperature(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let draft = validate_new_temperature(&payload)?;
    let created = state.temperatures.create(&draft).await?;
    Ok(HttpResponse::Created().json(created.map(TemperatureBody::from)))
}

/// Change one of `city_id`, `temperature`, or `date`.
#[utoipa::path(
    put,
    path = "/temperatures/{id}",
    params(("id" = i32, Path, description = "Reading identifier")),
    request_body = UpdateFieldRequestBody,
    responses(
        (status = 200, description = "Updated reading", body = TemperatureBody),
        (status = 400, description = "Unknown column or invalid value", body = ErrorSchema),
        (status = 404, description = "No such reading", body = ErrorSchema)
    ),
    tags = ["temperatures"],
    operation_id = "updateTemperature"
)]
#[put("/temperatures/{id}")]
pub async fn update_temperature(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<TemperatureBody>> {
    let id = TemperatureId::new(path.into_inner());
    let update = UpdateFieldRequestBody::from_value(payload.into_inner()).into_field_update();
    let updated = state.temperatures.partial_update(&id, &update).await?;
    Ok(web::Json(updated.into()))
}

/// Delete a reading.
#[utoipa::path(
    delete,
    path = "/temperatures/{id}",
    params(("id" = i32, Path, description = "Reading identifier")),
    responses(
        (status = 204, description = "Reading removed or already absent"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["temperatures"],
    operation_id = "deleteTemperature"
)]
#[delete("/temperatures/{id}")]
pub async fn delete_temperature(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .temperatures
        .delete(&TemperatureId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "temperatures_tests.rs"]
mod tests;
