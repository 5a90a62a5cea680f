//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required field is missing or a value cannot be coerced.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// An update named a column that cannot be changed.
    #[schema(rename = "unknown_field")]
    UnknownField,
    /// A uniqueness rule rejected the write.
    #[schema(rename = "conflict")]
    Conflict,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "This state already exists")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the failing field or constraint.
    details: Option<serde_json::Value>,
}

/// Documented shape of a state create body.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreateStateSchema {
    #[schema(example = "TX")]
    abbrev: String,
    #[schema(example = "Texas")]
    name: String,
}

/// Documented shape of a city create body.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreateCitySchema {
    #[schema(example = "TX")]
    state_abbrev: String,
    #[schema(example = "Austin")]
    name: String,
    #[schema(example = "humid subtropical")]
    climate: String,
}

/// Documented shape of a temperature create body.
///
/// `city` and `temperature` also accept numeric strings.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreateTemperatureSchema {
    #[schema(example = 1)]
    city: i32,
    #[schema(example = 72)]
    temperature: i32,
    #[schema(example = "2024-01-01", format = Date)]
    date: String,
}
