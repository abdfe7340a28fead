//! Tests for habit HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::UserId;
use crate::domain::ports::{HabitCommand, MockHabitCommand};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{login_and_get_cookie, login_as, test_session_middleware};
use crate::inbound::http::users::login;
use crate::test_support::{InMemoryHarness, MutableClock, StubLoginService};

fn app_with(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(list_habits)
                .service(create_habit)
                .service(update_habit)
                .service(toggle_edit_mode)
                .service(delete_habit),
        )
}

fn two_user_harness() -> (InMemoryHarness, HttpStatePorts) {
    let harness = InMemoryHarness::new(MutableClock::at_noon(2024, 3, 5));
    let login_service = StubLoginService::default()
        .with_user("alice", UserId::random())
        .with_user("bob", UserId::random());
    let ports = harness.ports(Arc::new(login_service));
    (harness, ports)
}

async fn create_run_habit(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: actix_web::cookie::Cookie<'static>,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/habits")
        .cookie(cookie)
        .set_json(json!({ "name": "Run", "targetDaysPerWeek": 3 }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("id in response")
        .to_owned()
}

#[rstest]
fn missing_name_reports_missing_field() {
    let body = HabitRequestBody {
        target_days_per_week: Some(3),
        ..HabitRequestBody::default()
    };
    let err = parse_habit_details(body, MissingColor::UseDefault).expect_err("missing name");
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "name", "code": "missing_field" }))
    );
}

#[rstest]
#[case(MissingColor::UseDefault, true)]
#[case(MissingColor::Reject, false)]
fn omitted_colour_depends_on_operation(#[case] policy: MissingColor, #[case] accepted: bool) {
    let body = HabitRequestBody {
        name: Some("Run".into()),
        target_days_per_week: Some(3),
        ..HabitRequestBody::default()
    };
    let result = parse_habit_details(body, policy);
    match (accepted, result) {
        (true, Ok(details)) => assert_eq!(details.color.as_ref(), "#10B981"),
        (false, Err(err)) => assert_eq!(
            err.details().and_then(|d| d.get("field")),
            Some(&json!("color"))
        ),
        (_, other) => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
#[case(json!({ "name": "   ", "targetDaysPerWeek": 3 }), "name", "empty_name")]
#[case(json!({ "name": "Run", "targetDaysPerWeek": 0 }), "targetDaysPerWeek", "target_days_out_of_range")]
#[case(json!({ "name": "Run", "targetDaysPerWeek": 8 }), "targetDaysPerWeek", "target_days_out_of_range")]
#[case(json!({ "name": "Run" }), "targetDaysPerWeek", "missing_field")]
#[case(json!({ "name": "Run", "targetDaysPerWeek": 3, "color": "Red" }), "color", "invalid_color")]
#[actix_web::test]
async fn create_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(app_with(HttpStatePorts::fixtures())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/habits")
        .cookie(cookie)
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    let details = body.get("details").expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

#[actix_web::test]
async fn create_then_list_returns_camel_case_habit() {
    let (_harness, ports) = two_user_harness();
    let app = actix_test::init_service(app_with(ports)).await;
    let cookie = login_as(&app, "alice", "pw").await;

    let id = create_run_habit(&app, cookie.clone()).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/habits")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let habits = body.as_array().expect("array");
    assert_eq!(habits.len(), 1);
    let habit = habits.first().expect("one habit");
    assert_eq!(habit.get("id").and_then(Value::as_str), Some(id.as_str()));
    assert_eq!(habit.get("name").and_then(Value::as_str), Some("Run"));
    assert_eq!(habit.get("targetDaysPerWeek").and_then(Value::as_u64), Some(3));
    assert_eq!(habit.get("color").and_then(Value::as_str), Some("#10B981"));
    assert_eq!(habit.get("editMode").and_then(Value::as_bool), Some(false));
    assert_eq!(habit.get("description"), Some(&Value::Null));
    assert!(habit.get("target_days_per_week").is_none());
}

#[actix_web::test]
async fn anonymous_list_is_empty() {
    let (_harness, ports) = two_user_harness();
    let app = actix_test::init_service(app_with(ports)).await;
    let cookie = login_as(&app, "alice", "pw").await;
    create_run_habit(&app, cookie).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/habits")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[case(actix_test::TestRequest::post().uri("/api/v1/habits").set_json(json!({ "name": "Run", "targetDaysPerWeek": 3 })))]
#[case(actix_test::TestRequest::put().uri("/api/v1/habits/3fa85f64-5717-4562-b3fc-2c963f66afa6").set_json(json!({ "name": "Run", "targetDaysPerWeek": 3, "color": "#fff" })))]
#[case(actix_test::TestRequest::post().uri("/api/v1/habits/3fa85f64-5717-4562-b3fc-2c963f66afa6/edit-mode"))]
#[case(actix_test::TestRequest::delete().uri("/api/v1/habits/3fa85f64-5717-4562-b3fc-2c963f66afa6"))]
#[actix_web::test]
async fn anonymous_mutations_are_unauthorised(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(app_with(HttpStatePorts::fixtures())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn non_owner_sees_not_found_for_every_mutation() {
    let (harness, ports) = two_user_harness();
    let app = actix_test::init_service(app_with(ports)).await;
    let alice = login_as(&app, "alice", "pw").await;
    let bob = login_as(&app, "bob", "pw").await;
    let id = create_run_habit(&app, alice).await;

    let requests = [
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/habits/{id}"))
            .set_json(json!({ "name": "Mine", "targetDaysPerWeek": 1, "color": "#fff" })),
        actix_test::TestRequest::post().uri(&format!("/api/v1/habits/{id}/edit-mode")),
        actix_test::TestRequest::delete().uri(&format!("/api/v1/habits/{id}")),
    ];
    for request in requests {
        let response =
            actix_test::call_service(&app, request.cookie(bob.clone()).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("message").and_then(Value::as_str), Some("habit not found"));
    }
    assert_eq!(harness.store.habit_count(), 1);
}

#[actix_web::test]
async fn edit_mode_toggle_returns_new_value() {
    let (_harness, ports) = two_user_harness();
    let app = actix_test::init_service(app_with(ports)).await;
    let cookie = login_as(&app, "alice", "pw").await;
    let id = create_run_habit(&app, cookie.clone()).await;

    for expected in [true, false] {
        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/habits/{id}/edit-mode"))
            .cookie(cookie.clone())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "editMode": expected }));
    }
}

#[actix_web::test]
async fn update_replaces_fields_and_delete_removes_habit() {
    let (harness, ports) = two_user_harness();
    let app = actix_test::init_service(app_with(ports)).await;
    let cookie = login_as(&app, "alice", "pw").await;
    let id = create_run_habit(&app, cookie.clone()).await;

    let update = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/habits/{id}"))
        .cookie(cookie.clone())
        .set_json(json!({
            "name": "Swim",
            "description": "  pool  ",
            "targetDaysPerWeek": 2,
            "color": "sky-500"
        }))
        .to_request();
    let response = actix_test::call_service(&app, update).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list = actix_test::TestRequest::get()
        .uri("/api/v1/habits")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, list).await;
    let habit = body.get(0).expect("habit listed");
    assert_eq!(habit.get("name").and_then(Value::as_str), Some("Swim"));
    assert_eq!(habit.get("description").and_then(Value::as_str), Some("pool"));
    assert_eq!(habit.get("color").and_then(Value::as_str), Some("sky-500"));

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/habits/{id}"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(harness.store.habit_count(), 0);
}

#[actix_web::test]
async fn malformed_habit_id_is_a_bad_request() {
    let app = actix_test::init_service(app_with(HttpStatePorts::fixtures())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/habits/not-a-uuid")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("details"),
        Some(&json!({ "field": "habitId", "value": "not-a-uuid", "code": "invalid_uuid" }))
    );
}

#[actix_web::test]
async fn store_outage_surfaces_as_service_unavailable() {
    let mut command = MockHabitCommand::new();
    command
        .expect_delete()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("habit repository unavailable")));
    let ports = HttpStatePorts {
        habits: Arc::new(command) as Arc<dyn HabitCommand>,
        ..HttpStatePorts::fixtures()
    };
    let app = actix_test::init_service(app_with(ports)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/habits/3fa85f64-5717-4562-b3fc-2c963f66afa6")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
