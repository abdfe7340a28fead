//! Tests for the habit service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockHabitRepository;
use crate::domain::{
    ErrorCode, HabitColor, HabitDetails, HabitDraft, HabitName, TargetDaysPerWeek,
};
use crate::test_support::MutableClock;

fn make_service(repo: MockHabitRepository) -> HabitService<MockHabitRepository> {
    HabitService::new(Arc::new(repo), Arc::new(MutableClock::at_noon(2024, 3, 5)))
}

#[fixture]
fn details() -> HabitDetails {
    HabitDetails {
        name: HabitName::new("Run").expect("valid name"),
        description: None,
        target_days_per_week: TargetDaysPerWeek::new(3).expect("valid target"),
        color: HabitColor::default(),
    }
}

fn habit_owned_by(owner: UserId, details: HabitDetails) -> Habit {
    Habit::new(HabitDraft {
        id: HabitId::random(),
        owner_id: owner,
        details,
        edit_mode: false,
        created_at: Utc::now(),
    })
}

#[rstest]
#[tokio::test]
async fn create_stamps_owner_and_clock_time(details: HabitDetails) {
    let owner = UserId::random();
    let expected_created_at = Utc
        .with_ymd_and_hms(2024, 3, 5, 12, 0, 0)
        .single()
        .expect("timestamp");
    let mut repo = MockHabitRepository::new();
    repo.expect_insert()
        .withf(move |habit| {
            habit.is_owned_by(&owner)
                && !habit.edit_mode()
                && habit.created_at() == expected_created_at
        })
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo);
    let request = CreateHabitRequest {
        caller: Some(owner),
        details,
    };

    service.create(request).await.expect("habit created");
}

#[rstest]
#[tokio::test]
async fn create_requires_a_caller(details: HabitDetails) {
    let mut repo = MockHabitRepository::new();
    repo.expect_insert().never();

    let service = make_service(repo);
    let err = service
        .create(CreateHabitRequest {
            caller: None,
            details,
        })
        .await
        .expect_err("anonymous create");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn update_of_foreign_habit_reads_as_not_found(details: HabitDetails) {
    let foreign = habit_owned_by(UserId::random(), details.clone());
    let habit_id = foreign.id();
    let mut repo = MockHabitRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(foreign)));
    repo.expect_update_details().never();

    let service = make_service(repo);
    let err = service
        .update(UpdateHabitRequest {
            caller: Some(UserId::random()),
            habit_id,
            details,
        })
        .await
        .expect_err("foreign update");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), HABIT_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn missing_and_foreign_habits_share_one_message(details: HabitDetails) {
    let foreign = habit_owned_by(UserId::random(), details);
    let foreign_id = foreign.id();
    let mut repo = MockHabitRepository::new();
    repo.expect_find_by_id().returning(move |id| {
        if *id == foreign_id {
            Ok(Some(foreign.clone()))
        } else {
            Ok(None)
        }
    });

    let service = make_service(repo);
    let caller = Some(UserId::random());
    let missing = service
        .delete(HabitRequest {
            caller,
            habit_id: HabitId::random(),
        })
        .await
        .expect_err("missing habit");
    let not_owned = service
        .delete(HabitRequest {
            caller,
            habit_id: foreign_id,
        })
        .await
        .expect_err("foreign habit");

    assert_eq!(missing, not_owned);
}

#[rstest]
#[tokio::test]
async fn toggle_edit_mode_returns_new_flag(details: HabitDetails) {
    let owner = UserId::random();
    let habit = habit_owned_by(owner, details);
    let habit_id = habit.id();
    let mut repo = MockHabitRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(habit)));
    repo.expect_toggle_edit_mode()
        .times(1)
        .return_once(|_| Ok(Some(true)));

    let service = make_service(repo);
    let edit_mode = service
        .toggle_edit_mode(HabitRequest {
            caller: Some(owner),
            habit_id,
        })
        .await
        .expect("toggle");

    assert!(edit_mode);
}

#[rstest]
#[tokio::test]
async fn delete_removes_habit_with_completions(details: HabitDetails) {
    let owner = UserId::random();
    let habit = habit_owned_by(owner, details);
    let habit_id = habit.id();
    let mut repo = MockHabitRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(habit)));
    repo.expect_delete_with_completions()
        .withf(move |id| *id == habit_id)
        .times(1)
        .return_once(|_| Ok(true));

    let service = make_service(repo);
    service
        .delete(HabitRequest {
            caller: Some(owner),
            habit_id,
        })
        .await
        .expect("delete");
}

#[tokio::test]
async fn list_without_caller_is_empty_and_skips_storage() {
    let mut repo = MockHabitRepository::new();
    repo.expect_list_for_owner().never();

    let service = make_service(repo);
    let habits = service.list(None).await.expect("anonymous list");

    assert!(habits.is_empty());
}

#[rstest]
#[case(HabitRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(HabitRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_domain_errors(
    #[case] failure: HabitRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockHabitRepository::new();
    repo.expect_list_for_owner()
        .return_once(move |_| Err(failure));

    let service = make_service(repo);
    let err = service
        .list(Some(UserId::random()))
        .await
        .expect_err("repository failure");

    assert_eq!(err.code(), expected);
}
