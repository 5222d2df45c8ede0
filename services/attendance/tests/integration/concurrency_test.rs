use futures::future::join_all;

use attendance_domain::event::EventKind;
use attendance_service::error::AttendanceError;
use attendance_testing::vectors::axis;

use crate::helpers::{MemoryRepo, check, enroll, recognize_usecase, settings};

#[tokio::test]
async fn should_never_record_two_consecutive_equal_kinds_under_concurrent_checks() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    enroll(&repo, &ana, &axis(0)).await;
    let usecase = recognize_usecase(&repo, settings());
    let face = axis(0);

    let results = join_all((0..8).map(|_| check(&usecase, &face, Some(1)))).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AttendanceError::Conflict)))
        .count();
    assert_eq!(succeeded + conflicts, 8, "unexpected error in {results:?}");
    assert!(succeeded >= 1);

    let kinds: Vec<EventKind> = repo.events_of(ana.id).iter().map(|e| e.kind).collect();
    assert_eq!(kinds.len(), succeeded);
    assert_eq!(kinds[0], EventKind::In);
    for pair in kinds.windows(2) {
        assert_ne!(pair[0], pair[1], "consecutive equal kinds in {kinds:?}");
    }
}

#[tokio::test]
async fn should_retry_once_then_succeed_after_a_lost_race() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    enroll(&repo, &ana, &axis(0)).await;
    repo.force_conflicts(1);

    let outcome = check(&recognize_usecase(&repo, settings()), &axis(0), None)
        .await
        .unwrap();

    assert!(outcome.is_recognized());
    assert_eq!(repo.events_of(ana.id).len(), 1);
}

#[tokio::test]
async fn should_surface_conflict_without_partial_writes_when_retry_also_loses() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    enroll(&repo, &ana, &axis(0)).await;
    let encodings_before = repo.encoding_count();
    repo.force_conflicts(2);

    let result = check(&recognize_usecase(&repo, settings()), &axis(0), None).await;

    assert!(
        matches!(result, Err(AttendanceError::Conflict)),
        "expected Conflict, got {result:?}"
    );
    assert_eq!(repo.event_count(), 0);
    assert_eq!(repo.encoding_count(), encodings_before);
}
