use attendance_domain::event::{EventKind, Presence};
use attendance_domain::id::{EmployeeId, FacilityId};
use attendance_domain::pagination::{PageRequest, Sort};
use attendance_service::domain::types::AccessEventFilter;
use attendance_service::usecase::access_event::ListAccessEventsUseCase;
use attendance_service::usecase::employee::{
    CreateEmployeeInput, CreateEmployeeUseCase, GetPresenceUseCase, ListEmployeesUseCase,
};
use attendance_service::usecase::recognition::RecognitionOutcome;
use attendance_testing::vectors::{axis, seeded};

use crate::helpers::{MemoryRepo, check, enroll, recognize_usecase, settings};

fn event_of(outcome: &RecognitionOutcome) -> Option<EventKind> {
    match outcome {
        RecognitionOutcome::Recognized { event, .. } => Some(*event),
        _ => None,
    }
}

async fn presence_of(repo: &MemoryRepo, employee_id: EmployeeId) -> Presence {
    GetPresenceUseCase {
        employees: repo.clone(),
        events: repo.clone(),
    }
    .execute(employee_id)
    .await
    .unwrap()
    .presence
}

#[tokio::test]
async fn should_check_in_then_out_and_ignore_a_stranger() {
    let repo = MemoryRepo::new();
    let e1 = CreateEmployeeUseCase { repo: repo.clone() }
        .execute(CreateEmployeeInput {
            name: "E1".into(),
            facility_id: FacilityId(1),
        })
        .await
        .unwrap();
    let v1 = axis(0);
    enroll(&repo, &e1, &v1).await;
    let usecase = recognize_usecase(&repo, settings());
    assert_eq!(presence_of(&repo, e1.id).await, Presence::Absent);

    let first = check(&usecase, &v1, None).await.unwrap();
    assert!(first.is_recognized());
    assert_eq!(event_of(&first), Some(EventKind::In));
    assert_eq!(presence_of(&repo, e1.id).await, Presence::Present);

    let second = check(&usecase, &v1, None).await.unwrap();
    assert_eq!(event_of(&second), Some(EventKind::Out));
    assert_eq!(presence_of(&repo, e1.id).await, Presence::Absent);

    let events_before = repo.event_count();
    let v2 = seeded(99);
    let stranger = check(&usecase, &v2, None).await.unwrap();
    assert!(!stranger.is_recognized());
    assert_eq!(repo.event_count(), events_before);
}

#[tokio::test]
async fn should_list_audit_trail_newest_first_with_filters() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    let bruno = repo.add_employee("Bruno", 2);
    enroll(&repo, &ana, &axis(0)).await;
    enroll(&repo, &bruno, &axis(1)).await;
    let usecase = recognize_usecase(&repo, settings());

    check(&usecase, &axis(0), Some(1)).await.unwrap();
    check(&usecase, &axis(1), Some(2)).await.unwrap();
    check(&usecase, &axis(0), Some(1)).await.unwrap();

    let list = ListAccessEventsUseCase { repo: repo.clone() };
    let all = list
        .execute(AccessEventFilter::default(), Sort::Desc, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].employee_id, ana.id);
    assert_eq!(all[0].kind, EventKind::Out);

    let anas = list
        .execute(
            AccessEventFilter {
                employee_id: Some(ana.id),
                facility_id: None,
            },
            Sort::Asc,
            PageRequest::default(),
        )
        .await
        .unwrap();
    let kinds: Vec<EventKind> = anas.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::In, EventKind::Out]);

    let site_two = list
        .execute(
            AccessEventFilter {
                employee_id: None,
                facility_id: Some(FacilityId(2)),
            },
            Sort::Desc,
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(site_two.len(), 1);
    assert_eq!(site_two[0].employee_id, bruno.id);

    let second_page = list
        .execute(
            AccessEventFilter::default(),
            Sort::Desc,
            PageRequest::new(Some(2), Some(2)),
        )
        .await
        .unwrap();
    assert_eq!(second_page.len(), 1);
}

#[tokio::test]
async fn should_list_employees_by_facility() {
    let repo = MemoryRepo::new();
    repo.add_employee("Ana", 1);
    repo.add_employee("Bruno", 2);
    repo.add_employee("Carla", 1);

    let list = ListEmployeesUseCase { repo: repo.clone() };
    let site_one = list
        .execute(Some(FacilityId(1)), PageRequest::default())
        .await
        .unwrap();
    let names: Vec<&str> = site_one.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Carla"]);

    let everyone = list.execute(None, PageRequest::default()).await.unwrap();
    assert_eq!(everyone.len(), 3);
}
