use uuid::Uuid;

use attendance_domain::id::EmployeeId;
use attendance_service::domain::types::{EncodingCap, RecognitionSettings};
use attendance_service::error::AttendanceError;
use attendance_service::usecase::enrollment::{EnrollFaceInput, RemoveFacesUseCase};
use attendance_service::usecase::recognition::RecognitionOutcome;
use attendance_testing::vectors::{self, axis, seeded};

use crate::helpers::{MemoryRepo, check, enroll, enroll_usecase, recognize_usecase, settings};

#[tokio::test]
async fn should_recognize_employee_right_after_enrollment() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    let face = seeded(7);
    enroll(&repo, &ana, &face).await;

    let outcome = check(&recognize_usecase(&repo, settings()), &face, None)
        .await
        .unwrap();

    match outcome {
        RecognitionOutcome::Recognized {
            employee_id,
            name,
            distance,
            ..
        } => {
            assert_eq!(employee_id, ana.id);
            assert_eq!(name, "Ana");
            assert!(distance.abs() < 1e-6, "distance was {distance}");
        }
        other => panic!("expected Recognized, got {other:?}"),
    }
}

#[tokio::test]
async fn should_not_write_access_events_on_enrollment() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    enroll(&repo, &ana, &axis(0)).await;
    enroll(&repo, &ana, &axis(1)).await;

    assert_eq!(repo.encodings_of(ana.id).len(), 2);
    assert_eq!(repo.event_count(), 0);
}

#[tokio::test]
async fn should_return_employee_not_found_for_unknown_employee() {
    let repo = MemoryRepo::new();
    let result = enroll_usecase(&repo, settings())
        .execute(EnrollFaceInput {
            employee_id: EmployeeId(Uuid::now_v7()),
            image: vectors::as_image(&axis(0)),
        })
        .await;

    assert!(
        matches!(result, Err(AttendanceError::EmployeeNotFound)),
        "expected EmployeeNotFound, got {result:?}"
    );
    assert_eq!(repo.encoding_count(), 0);
}

#[tokio::test]
async fn should_return_no_face_detected_for_unreadable_image() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    let result = enroll_usecase(&repo, settings())
        .execute(EnrollFaceInput {
            employee_id: ana.id,
            image: vec![1, 2, 3],
        })
        .await;

    assert!(matches!(result, Err(AttendanceError::NoFaceDetected)));
    assert_eq!(repo.encoding_count(), 0);
}

#[tokio::test]
async fn should_evict_oldest_encodings_beyond_cap() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    let capped = RecognitionSettings {
        encoding_cap: EncodingCap::MostRecent(2),
        ..settings()
    };

    for i in 0..4 {
        enroll_usecase(&repo, capped)
            .execute(EnrollFaceInput {
                employee_id: ana.id,
                image: vectors::as_image(&axis(i)),
            })
            .await
            .unwrap();
    }

    let kept: Vec<Vec<f32>> = repo
        .encodings_of(ana.id)
        .into_iter()
        .map(|e| e.embedding.values)
        .collect();
    assert_eq!(kept, vec![axis(2).values, axis(3).values]);
}

#[tokio::test]
async fn should_drop_employee_from_candidates_after_removing_faces() {
    let repo = MemoryRepo::new();
    let ana = repo.add_employee("Ana", 1);
    enroll(&repo, &ana, &axis(0)).await;
    enroll(&repo, &ana, &axis(1)).await;

    let removed = RemoveFacesUseCase {
        employees: repo.clone(),
        encodings: repo.clone(),
    }
    .execute(ana.id)
    .await
    .unwrap();
    assert_eq!(removed, 2);

    let outcome = check(&recognize_usecase(&repo, settings()), &axis(0), None)
        .await
        .unwrap();
    assert_eq!(outcome, RecognitionOutcome::NoCandidates);
}
