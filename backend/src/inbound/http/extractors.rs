//! Extractor configuration answering malformed input with the JSON error
//! envelope instead of Actix's plain-text defaults.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request("Request body must be a JSON object")
        .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
        .into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected path parameter");
    Error::invalid_request("Invalid path parameter")
        .with_details(json!({ "code": "invalid_path", "reason": err.to_string() }))
        .into()
}

/// JSON body extractor settings.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor settings.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
