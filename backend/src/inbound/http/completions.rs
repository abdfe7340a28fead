//! Completion API handlers.
//!
//! ```text
//! POST /api/v1/habits/{habitId}/completions/2024-03-05
//! GET /api/v1/completions?startDate=2024-03-01&endDate=2024-03-31
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Completion;
use crate::domain::ports::{CompletionHistoryRequest, ToggleCompletionRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::habits::HABIT_ID;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_habit_id, parse_optional_date,
};

const DATE: FieldName = FieldName::new("date");
const START_DATE: FieldName = FieldName::new("startDate");
const END_DATE: FieldName = FieldName::new("endDate");

/// Path segments of the toggle endpoint, validated in the handler.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPath {
    pub habit_id: String,
    pub date: String,
}

/// Query parameters for `GET /api/v1/completions`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CompletionHistoryQuery {
    /// First day, inclusive. Defaults to the start of the 90-day window.
    pub start_date: Option<String>,
    /// Last day, inclusive. Defaults to today (UTC).
    pub end_date: Option<String>,
}

/// Completion state of one habit on one date after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCompletionResponse {
    pub habit_id: String,
    #[schema(example = "2024-03-05")]
    pub date: String,
    pub completed: bool,
}

/// Recorded completion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub id: String,
    pub habit_id: String,
    #[schema(example = "2024-03-05")]
    pub date: String,
}

impl From<Completion> for CompletionResponse {
    fn from(value: Completion) -> Self {
        Self {
            id: value.id().to_string(),
            habit_id: value.habit_id().to_string(),
            date: value.date().to_string(),
        }
    }
}

/// Mark a habit done on a date, or unmark it if already done.
///
/// Dates other than today (UTC) require the habit to be in edit mode.
#[utoipa::path(
    post,
    path = "/api/v1/habits/{habitId}/completions/{date}",
    params(
        ("habitId" = String, Path, description = "Habit identifier"),
        ("date" = String, Path, description = "Calendar date as YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Completion toggled", body = ToggleCompletionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Edit mode required", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Conflict", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["completions"],
    operation_id = "toggleCompletion",
    security(("SessionCookie" = []))
)]
#[post("/habits/{habitId}/completions/{date}")]
pub async fn toggle_completion(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CompletionPath>,
) -> ApiResult<web::Json<ToggleCompletionResponse>> {
    let user_id = session.require_user_id()?;
    let CompletionPath { habit_id, date } = path.into_inner();
    let habit_id = parse_habit_id(&habit_id, HABIT_ID)?;
    let date = parse_date(&date, DATE)?;
    let outcome = state
        .completions
        .toggle(ToggleCompletionRequest {
            caller: Some(user_id),
            habit_id,
            date,
        })
        .await?;
    Ok(web::Json(ToggleCompletionResponse {
        habit_id: habit_id.to_string(),
        date: date.to_string(),
        completed: outcome.is_completed(),
    }))
}

/// Completions across all of the caller's habits within a date range.
///
/// Ordered by date, then habit. Anonymous callers and inverted ranges get an
/// empty list.
#[utoipa::path(
    get,
    path = "/api/v1/completions",
    params(CompletionHistoryQuery),
    responses(
        (status = 200, description = "Completions", body = [CompletionResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["completions"],
    operation_id = "listCompletions",
    security(("SessionCookie" = []), ())
)]
#[get("/completions")]
pub async fn list_completions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CompletionHistoryQuery>,
) -> ApiResult<web::Json<Vec<CompletionResponse>>> {
    let caller = session.user_id()?;
    let CompletionHistoryQuery {
        start_date,
        end_date,
    } = query.into_inner();
    let start = parse_optional_date(start_date.as_deref(), START_DATE)?;
    let end = parse_optional_date(end_date.as_deref(), END_DATE)?;
    let completions = state
        .completions_query
        .history(CompletionHistoryRequest { caller, start, end })
        .await?;
    Ok(web::Json(
        completions
            .into_iter()
            .map(CompletionResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
