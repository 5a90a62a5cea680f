//! State HTTP handlers.
//!
//! ```text
//! GET    /states
//! GET    /states/{abbrev}
//! POST   /states
//! PUT    /states/{abbrev}
//! DELETE /states/{abbrev}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::validation::validate_new_state;
use crate::domain::{Resource, State};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payloads::UpdateFieldRequestBody;
use crate::inbound::http::schemas::{CreateStateSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// State record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StateBody {
    #[schema(example = "TX")]
    pub abbrev: String,
    #[schema(example = "Texas")]
    pub name: String,
}

impl From<State> for StateBody {
    fn from(value: State) -> Self {
        Self {
            abbrev: value.abbrev().to_owned(),
            name: value.name().to_owned(),
        }
    }
}

/// List every state.
#[utoipa::path(
    get,
    path = "/states",
    responses(
        (status = 200, description = "All states", body = [StateBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "listStates"
)]
#[get("/states")]
pub async fn list_states(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<StateBody>>> {
    let states = state.states.list().await?;
    Ok(web::Json(states.into_iter().map(StateBody::from).collect()))
}

/// Fetch one state by abbreviation.
#[utoipa::path(
    get,
    path = "/states/{abbrev}",
    params(("abbrev" = String, Path, description = "State abbreviation")),
    responses(
        (status = 200, description = "The state", body = StateBody),
        (status = 404, description = "No such state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "getState"
)]
#[get("/states/{abbrev}")]
pub async fn get_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StateBody>> {
    let abbrev = path.into_inner();
    state
        .states
        .get_by_key(&abbrev)
        .await?
        .map(|found| web::Json(StateBody::from(found)))
        .ok_or_else(|| State::KIND.not_found())
}

/// Create a state. Answers `201` with `null` when the new record could not
/// be read back.
#[utoipa::path(
    post,
    path = "/states",
    request_body = CreateStateSchema,
    responses(
        (status = 201, description = "State created", body = StateBody),
        (status = 400, description = "Invalid or duplicate state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "createState"
)]
#[post("/states")]
pub async fn create_state(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let draft = validate_new_state(&payload)?;
    let created = state.states.create(&draft).await?;
    Ok(HttpResponse::Created().json(created.map(StateBody::from)))
}

/// Change the state's name.
#[utoipa::path(
    put,
    path = "/states/{abbrev}",
    params(("abbrev" = String, Path, description = "State abbreviation")),
    request_body = UpdateFieldRequestBody,
    responses(
        (status = 200, description = "Updated state", body = StateBody),
        (status = 400, description = "Unknown column or invalid value", body = ErrorSchema),
        (status = 404, description = "No such state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "updateState"
)]
#[put("/states/{abbrev}")]
pub async fn update_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<StateBody>> {
    let abbrev = path.into_inner();
    let update = UpdateFieldRequestBody::from_value(payload.into_inner()).into_field_update();
    let updated = state.states.partial_update(&abbrev, &update).await?;
    Ok(web::Json(updated.into()))
}

/// Delete a state together with its cities and their readings.
#[utoipa::path(
    delete,
    path = "/states/{abbrev}",
    params(("abbrev" = String, Path, description = "State abbreviation")),
    responses(
        (status = 204, description = "State removed or already absent"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "deleteState"
)]
#[delete("/states/{abbrev}")]
pub async fn delete_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.states.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "states_tests.rs"]
mod tests;
