//! Habit API handlers.
//!
//! ```text
//! GET /api/v1/habits
//! POST /api/v1/habits {"name":"Run","targetDaysPerWeek":3}
//! PUT /api/v1/habits/{habitId}
//! POST /api/v1/habits/{habitId}/edit-mode
//! DELETE /api/v1/habits/{habitId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateHabitRequest, HabitRequest, UpdateHabitRequest};
use crate::domain::{
    Error, Habit, HabitColor, HabitDescription, HabitDetails, HabitId, HabitName,
    TargetDaysPerWeek,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::extractors::body;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_habit_id};

const NAME: FieldName = FieldName::new("name");
const TARGET_DAYS_PER_WEEK: FieldName = FieldName::new("targetDaysPerWeek");
const COLOR: FieldName = FieldName::new("color");
pub(crate) const HABIT_ID: FieldName = FieldName::new("habitId");

/// Request body for creating or updating a habit.
///
/// Every field is optional at the wire level so missing values surface as
/// `missing_field` validation errors rather than opaque JSON failures.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitRequestBody {
    #[schema(example = "Run")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = 3, minimum = 1, maximum = 7)]
    pub target_days_per_week: Option<i64>,
    /// Omitted on create means `#10B981`. Required on update.
    #[schema(example = "#10B981")]
    pub color: Option<String>,
}

/// How to treat an omitted colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingColor {
    UseDefault,
    Reject,
}

fn parse_habit_details(
    body: HabitRequestBody,
    missing_color: MissingColor,
) -> Result<HabitDetails, Error> {
    let HabitRequestBody {
        name,
        description,
        target_days_per_week,
        color,
    } = body;
    let name = name.ok_or_else(|| missing_field_error(NAME))?;
    let target = target_days_per_week.ok_or_else(|| missing_field_error(TARGET_DAYS_PER_WEEK))?;
    let color = match (color, missing_color) {
        (Some(raw), _) => HabitColor::new(raw)?,
        (None, MissingColor::UseDefault) => HabitColor::default(),
        (None, MissingColor::Reject) => return Err(missing_field_error(COLOR)),
    };
    Ok(HabitDetails {
        name: HabitName::new(name)?,
        description: HabitDescription::from_optional(description)?,
        target_days_per_week: TargetDaysPerWeek::new(target)?,
        color,
    })
}

/// Habit as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_days_per_week: u8,
    pub color: String,
    pub edit_mode: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<Habit> for HabitResponse {
    fn from(value: Habit) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().as_ref().to_owned(),
            description: value.description().map(|d| d.as_ref().to_owned()),
            target_days_per_week: value.target_days_per_week().get(),
            color: value.color().as_ref().to_owned(),
            edit_mode: value.edit_mode(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// Identifier of a freshly created habit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitResponse {
    pub id: String,
}

/// Edit-mode flag after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditModeResponse {
    pub edit_mode: bool,
}

fn habit_id_from_path(path: web::Path<String>) -> Result<HabitId, Error> {
    parse_habit_id(&path.into_inner(), HABIT_ID)
}

/// List the caller's habits, oldest first.
///
/// Anonymous callers receive an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/habits",
    responses(
        (status = 200, description = "Habits", body = [HabitResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "listHabits",
    security(("SessionCookie" = []), ())
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<HabitResponse>>> {
    let caller = session.user_id()?;
    let habits = state.habits_query.list(caller).await?;
    Ok(web::Json(
        habits.into_iter().map(HabitResponse::from).collect(),
    ))
}

/// Create a habit owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/habits",
    request_body = HabitRequestBody,
    responses(
        (status = 201, description = "Habit created", body = CreateHabitResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "createHabit",
    security(("SessionCookie" = []))
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<HabitRequestBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let details = parse_habit_details(body(payload)?, MissingColor::UseDefault)?;
    let id = state
        .habits
        .create(CreateHabitRequest {
            caller: Some(user_id),
            details,
        })
        .await?;
    Ok(HttpResponse::Created().json(CreateHabitResponse { id: id.to_string() }))
}

/// Replace a habit's name, description, weekly target, and colour.
#[utoipa::path(
    put,
    path = "/api/v1/habits/{habitId}",
    request_body = HabitRequestBody,
    params(
        ("habitId" = String, Path, description = "Habit identifier")
    ),
    responses(
        (status = 204, description = "Habit updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "updateHabit",
    security(("SessionCookie" = []))
)]
#[put("/habits/{habitId}")]
pub async fn update_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<HabitRequestBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let habit_id = habit_id_from_path(path)?;
    let details = parse_habit_details(body(payload)?, MissingColor::Reject)?;
    state
        .habits
        .update(UpdateHabitRequest {
            caller: Some(user_id),
            habit_id,
            details,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Flip a habit's edit mode.
#[utoipa::path(
    post,
    path = "/api/v1/habits/{habitId}/edit-mode",
    params(
        ("habitId" = String, Path, description = "Habit identifier")
    ),
    responses(
        (status = 200, description = "New edit-mode value", body = EditModeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "toggleEditMode",
    security(("SessionCookie" = []))
)]
#[post("/habits/{habitId}/edit-mode")]
pub async fn toggle_edit_mode(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EditModeResponse>> {
    let user_id = session.require_user_id()?;
    let habit_id = habit_id_from_path(path)?;
    let edit_mode = state
        .habits
        .toggle_edit_mode(HabitRequest {
            caller: Some(user_id),
            habit_id,
        })
        .await?;
    Ok(web::Json(EditModeResponse { edit_mode }))
}

/// Delete a habit together with its completions.
#[utoipa::path(
    delete,
    path = "/api/v1/habits/{habitId}",
    params(
        ("habitId" = String, Path, description = "Habit identifier")
    ),
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "deleteHabit",
    security(("SessionCookie" = []))
)]
#[delete("/habits/{habitId}")]
pub async fn delete_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let habit_id = habit_id_from_path(path)?;
    state
        .habits
        .delete(HabitRequest {
            caller: Some(user_id),
            habit_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "habits_tests.rs"]
mod tests;
