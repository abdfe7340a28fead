//! Extractor configuration that reports malformed requests as domain errors.
//!
//! Register [`json_config`] and [`query_config`] as app data so body and
//! query failures carry the usual `InvalidRequest` shape, details, and trace
//! id instead of Actix's plain-text rejection.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web;
use serde_json::json;

use crate::domain::Error;

fn malformed(field: &'static str, code: &'static str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Map a JSON body failure to an `InvalidRequest` error scoped to `body`.
pub fn json_payload_error(error: &JsonPayloadError) -> Error {
    match error {
        JsonPayloadError::ContentType => malformed(
            "body",
            "unsupported_content_type",
            "request body must be application/json".to_owned(),
        ),
        JsonPayloadError::Deserialize(source) if source.is_data() => malformed(
            "body",
            "invalid_field_type",
            format!("request body has a field of the wrong type: {source}"),
        ),
        JsonPayloadError::Deserialize(source) => malformed(
            "body",
            "invalid_json",
            format!("request body is not valid JSON: {source}"),
        ),
        other => malformed("body", "invalid_body", format!("request body rejected: {other}")),
    }
}

/// Map a query-string failure to an `InvalidRequest` error scoped to `query`.
pub fn query_payload_error(error: &QueryPayloadError) -> Error {
    malformed(
        "query",
        "invalid_query",
        format!("query string rejected: {error}"),
    )
}

/// JSON extractor settings for every API route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _req| json_payload_error(&error).into())
}

/// Query extractor settings for every API route.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|error, _req| query_payload_error(&error).into())
}

/// Unwrap a body extracted as `Result` once the handler has authenticated
/// the caller, so anonymous writes report `401` whatever the body holds.
pub fn body<T>(payload: Result<web::Json<T>, actix_web::Error>) -> Result<T, Error> {
    payload
        .map(web::Json::into_inner)
        .map_err(|error| match error.as_error::<Error>() {
            Some(domain) => domain.clone(),
            None => malformed("body", "invalid_body", format!("request body rejected: {error}")),
        })
}
