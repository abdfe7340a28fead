//! End-to-end HTTP coverage for habits and completions.
//!
//! Builds the same middleware stack as the server (tracing plus cookie
//! sessions) over the in-memory store, then walks a user through a week of
//! habit tracking.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use habit_backend::Trace;
use habit_backend::domain::{TRACE_ID_HEADER, UserId};
use habit_backend::inbound::http::completions::{list_completions, toggle_completion};
use habit_backend::inbound::http::extractors::{json_config, query_config};
use habit_backend::inbound::http::habits::{
    create_habit, delete_habit, list_habits, toggle_edit_mode, update_habit,
};
use habit_backend::inbound::http::state::HttpState;
use habit_backend::inbound::http::users::{current_user, login, logout};
use habit_backend::test_support::{InMemoryHarness, MutableClock, StubLoginService};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const ALICE_ID: &str = "11111111-1111-1111-1111-111111111111";

#[fixture]
fn harness() -> InMemoryHarness {
    InMemoryHarness::new(MutableClock::at_noon(2024, 3, 5))
}

async fn init_app(
    harness: &InMemoryHarness,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let login_service = StubLoginService::default()
        .with_user("alice", UserId::new(ALICE_ID).expect("alice id"))
        .with_user("bob", UserId::random());
    let state = HttpState::new(harness.ports(Arc::new(login_service)));
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .service(login)
                    .service(logout)
                    .service(current_user)
                    .service(list_habits)
                    .service(create_habit)
                    .service(update_habit)
                    .service(toggle_edit_mode)
                    .service(delete_habit)
                    .service(toggle_completion)
                    .service(list_completions),
            ),
    )
    .await
}

async fn sign_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Option<String>, Value) {
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body(res).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, trace_id, json)
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    body: Value,
) -> String {
    let (status, _, json) = send(
        app,
        test::TestRequest::post().uri("/api/v1/habits").set_json(body),
        Some(cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json.get("id")
        .and_then(Value::as_str)
        .expect("habit id")
        .to_owned()
}

fn history_dates(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("history array")
        .iter()
        .filter_map(|entry| entry.get("date").and_then(Value::as_str))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn a_week_of_tracking(harness: InMemoryHarness) {
    let app = init_app(&harness).await;
    let alice = sign_in(&app, "alice").await;

    let (status, _, me) = send(&app, test::TestRequest::get().uri("/api/v1/users/me"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me.get("id").and_then(Value::as_str), Some(ALICE_ID));

    let run = create(
        &app,
        &alice,
        json!({ "name": "  Run  ", "description": "   ", "targetDaysPerWeek": 3 }),
    )
    .await;

    for _ in 0..3 {
        let uri = format!("/api/v1/habits/{run}/completions/{}", harness.clock.today());
        let (status, _, body) = send(&app, test::TestRequest::post().uri(&uri), Some(&alice)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("completed"), Some(&Value::Bool(true)));
        harness.clock.advance_days(2);
    }

    let (status, _, habits) = send(&app, test::TestRequest::get().uri("/api/v1/habits"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    let first = habits.get(0).expect("one habit");
    assert_eq!(first.get("name").and_then(Value::as_str), Some("Run"));
    assert_eq!(first.get("description"), Some(&Value::Null));
    assert_eq!(first.get("color").and_then(Value::as_str), Some("#10B981"));

    let (status, _, history) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/completions?startDate=2024-03-01&endDate=2024-03-31"),
        Some(&alice),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        history_dates(&history),
        vec!["2024-03-05", "2024-03-07", "2024-03-09"]
    );
}

#[rstest]
#[actix_web::test]
async fn editing_the_past_is_gated_by_edit_mode(harness: InMemoryHarness) {
    let app = init_app(&harness).await;
    let alice = sign_in(&app, "alice").await;
    let read = create(&app, &alice, json!({ "name": "Read", "targetDaysPerWeek": 7, "color": "sky-500" })).await;
    let past = format!("/api/v1/habits/{read}/completions/2024-02-29");

    let (status, trace_id, body) = send(&app, test::TestRequest::post().uri(&past), Some(&alice)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("edit_mode_required"));
    assert_eq!(body.get("traceId").and_then(Value::as_str), trace_id.as_deref());

    let edit = format!("/api/v1/habits/{read}/edit-mode");
    let (status, _, body) = send(&app, test::TestRequest::post().uri(&edit), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("editMode"), Some(&Value::Bool(true)));

    let (status, _, _) = send(&app, test::TestRequest::post().uri(&past), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.store.completion_count(), 1);
}

#[rstest]
#[actix_web::test]
async fn habits_are_private_and_deletes_cascade(harness: InMemoryHarness) {
    let app = init_app(&harness).await;
    let alice = sign_in(&app, "alice").await;
    let bob = sign_in(&app, "bob").await;
    let run = create(&app, &alice, json!({ "name": "Run", "targetDaysPerWeek": 3 })).await;
    let today = format!("/api/v1/habits/{run}/completions/2024-03-05");
    send(&app, test::TestRequest::post().uri(&today), Some(&alice)).await;

    let (_, _, bobs) = send(&app, test::TestRequest::get().uri("/api/v1/habits"), Some(&bob)).await;
    assert_eq!(bobs, json!([]));
    let (status, _, body) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/v1/habits/{run}")),
        Some(&bob),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("message").and_then(Value::as_str), Some("habit not found"));

    let (status, _, _) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/v1/habits/{run}")),
        Some(&alice),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(harness.store.habit_count(), 0);
    assert_eq!(harness.store.completion_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn logging_out_ends_write_access(harness: InMemoryHarness) {
    let app = init_app(&harness).await;
    let alice = sign_in(&app, "alice").await;
    create(&app, &alice, json!({ "name": "Run", "targetDaysPerWeek": 3 })).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let (status, _, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/habits")
            .set_json(json!({ "name": "Swim", "targetDaysPerWeek": 2 })),
        Some(&cleared),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));

    let (status, _, habits) = send(&app, test::TestRequest::get().uri("/api/v1/habits"), Some(&cleared)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(habits, json!([]));
}

#[rstest]
#[actix_web::test]
async fn malformed_bodies_are_unauthorised_before_they_are_invalid(harness: InMemoryHarness) {
    let app = init_app(&harness).await;
    let alice = sign_in(&app, "alice").await;
    let malformed = || {
        test::TestRequest::post()
            .uri("/api/v1/habits")
            .set_json(json!({ "name": "Run", "targetDaysPerWeek": "3" }))
    };

    let (status, _, body) = send(&app, malformed(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));

    let (status, trace_id, body) = send(&app, malformed(), Some(&alice)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(body.pointer("/details/field").and_then(Value::as_str), Some("body"));
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("invalid_field_type")
    );
    assert_eq!(body.get("traceId").and_then(Value::as_str), trace_id.as_deref());
    assert_eq!(harness.store.habit_count(), 0);
}
