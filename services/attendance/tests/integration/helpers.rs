use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use attendance_domain::embedding::Embedding;
use attendance_domain::id::{AccessEventId, EmployeeId, FacilityId};
use attendance_domain::matcher::Candidate;
use attendance_domain::pagination::{PageRequest, Sort};
use attendance_service::domain::repository::{
    AccessEventRepository, EmployeeRepository, EncodingRepository, FeatureExtractor,
};
use attendance_service::domain::types::{
    AccessEvent, AccessEventFilter, Employee, EmployeeChanges, Encoding, EncodingCap,
    RecognitionSettings,
};
use attendance_service::error::AttendanceError;
use attendance_service::usecase::enrollment::{EnrollFaceInput, EnrollFaceUseCase};
use attendance_service::usecase::recognition::{
    RecognitionOutcome, RecognizeInput, RecognizeUseCase,
};
use attendance_testing::vectors::{self, TEST_DIM};

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Store {
    pub employees: Vec<Employee>,
    pub encodings: Vec<Encoding>,
    pub events: Vec<AccessEvent>,
    /// Forced compare-and-swap losses still to hand out.
    pub forced_conflicts: usize,
}

/// Implements every repository port over one shared store.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    pub store: Arc<Mutex<Store>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding_count(&self) -> usize {
        self.store.lock().unwrap().encodings.len()
    }

    pub fn event_count(&self) -> usize {
        self.store.lock().unwrap().events.len()
    }

    pub fn encodings_of(&self, employee_id: EmployeeId) -> Vec<Encoding> {
        self.store
            .lock()
            .unwrap()
            .encodings
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect()
    }

    pub fn events_of(&self, employee_id: EmployeeId) -> Vec<AccessEvent> {
        self.store
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect()
    }

    pub fn force_conflicts(&self, n: usize) {
        self.store.lock().unwrap().forced_conflicts = n;
    }

    pub fn add_employee(&self, name: &str, facility_id: i32) -> Employee {
        let employee = test_employee(name, facility_id);
        self.store.lock().unwrap().employees.push(employee.clone());
        employee
    }

    /// Store an encoding directly, bypassing the extractor.
    pub fn seed_encoding(&self, employee_id: EmployeeId, embedding: Embedding) {
        self.store.lock().unwrap().encodings.push(Encoding {
            id: Uuid::now_v7().into(),
            employee_id,
            embedding,
            created_at: Utc::now(),
        });
    }
}

fn evict(store: &mut Store, employee_id: EmployeeId, cap: EncodingCap) {
    let Some(limit) = cap.limit() else {
        return;
    };
    let owned = store
        .encodings
        .iter()
        .filter(|e| e.employee_id == employee_id)
        .count();
    let mut excess = owned.saturating_sub(limit);
    // Insertion order is creation order, so the first matches are the oldest.
    store.encodings.retain(|e| {
        if excess > 0 && e.employee_id == employee_id {
            excess -= 1;
            return false;
        }
        true
    });
}

impl EmployeeRepository for MemoryRepo {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, AttendanceError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn create(&self, employee: &Employee) -> Result<(), AttendanceError> {
        self.store.lock().unwrap().employees.push(employee.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, AttendanceError> {
        let mut store = self.store.lock().unwrap();
        let Some(employee) = store.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            employee.name = name.clone();
        }
        if let Some(facility_id) = changes.facility_id {
            employee.facility_id = facility_id;
        }
        if let Some(is_active) = changes.is_active {
            employee.is_active = is_active;
        }
        employee.updated_at = Utc::now();
        Ok(true)
    }

    // Same cascade as the foreign keys.
    async fn delete(&self, id: EmployeeId) -> Result<bool, AttendanceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.employees.len();
        store.employees.retain(|e| e.id != id);
        if store.employees.len() == before {
            return Ok(false);
        }
        store.encodings.retain(|e| e.employee_id != id);
        store.events.retain(|e| e.employee_id != id);
        Ok(true)
    }

    async fn list(
        &self,
        facility_id: Option<FacilityId>,
        page: PageRequest,
    ) -> Result<Vec<Employee>, AttendanceError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .employees
            .iter()
            .filter(|e| facility_id.is_none_or(|f| e.facility_id == f))
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }
}

impl EncodingRepository for MemoryRepo {
    async fn enroll(&self, encoding: &Encoding, cap: EncodingCap) -> Result<(), AttendanceError> {
        let mut store = self.store.lock().unwrap();
        store.encodings.push(encoding.clone());
        evict(&mut store, encoding.employee_id, cap);
        Ok(())
    }

    async fn candidates(
        &self,
        facility_id: Option<FacilityId>,
        model_version: &str,
    ) -> Result<Vec<Candidate>, AttendanceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .employees
            .iter()
            .filter(|e| e.is_active && facility_id.is_none_or(|f| e.facility_id == f))
            .filter_map(|e| {
                let vectors: Vec<Vec<f32>> = store
                    .encodings
                    .iter()
                    .filter(|enc| {
                        enc.employee_id == e.id && enc.embedding.model_version == model_version
                    })
                    .map(|enc| enc.embedding.values.clone())
                    .collect();
                (!vectors.is_empty()).then(|| Candidate {
                    employee_id: e.id,
                    name: e.name.clone(),
                    vectors,
                })
            })
            .collect())
    }

    async fn delete_for_employee(&self, employee_id: EmployeeId) -> Result<u64, AttendanceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.encodings.len();
        store.encodings.retain(|e| e.employee_id != employee_id);
        Ok((before - store.encodings.len()) as u64)
    }
}

impl AccessEventRepository for MemoryRepo {
    async fn latest(&self, employee_id: EmployeeId) -> Result<Option<AccessEvent>, AttendanceError> {
        let latest = self
            .store
            .lock()
            .unwrap()
            .events
            .iter()
            .rev()
            .find(|e| e.employee_id == employee_id)
            .cloned();
        // Let concurrent checks interleave between the read and the write.
        tokio::task::yield_now().await;
        Ok(latest)
    }

    async fn create_with_reinforcement(
        &self,
        event: &AccessEvent,
        reinforcement: &Encoding,
        cap: EncodingCap,
        expected_last: Option<AccessEventId>,
    ) -> Result<(), AttendanceError> {
        let mut store = self.store.lock().unwrap();
        if store.forced_conflicts > 0 {
            store.forced_conflicts -= 1;
            return Err(AttendanceError::Conflict);
        }
        let current = store
            .events
            .iter()
            .rev()
            .find(|e| e.employee_id == event.employee_id)
            .map(|e| e.id);
        if current != expected_last {
            return Err(AttendanceError::Conflict);
        }
        store.encodings.push(reinforcement.clone());
        evict(&mut store, reinforcement.employee_id, cap);
        store.events.push(event.clone());
        Ok(())
    }

    async fn list(
        &self,
        filter: AccessEventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<AccessEvent>, AttendanceError> {
        let store = self.store.lock().unwrap();
        let mut events: Vec<AccessEvent> = store
            .events
            .iter()
            .filter(|e| filter.employee_id.is_none_or(|id| e.employee_id == id))
            .filter(|e| filter.facility_id.is_none_or(|f| e.facility_id == Some(f)))
            .cloned()
            .collect();
        if sort == Sort::Desc {
            events.reverse();
        }
        Ok(events
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}

// ── MockExtractor ────────────────────────────────────────────────────────────

/// Reads the "image" as little-endian f32s (see `vectors::as_image`).
#[derive(Clone, Copy)]
pub struct MockExtractor;

impl FeatureExtractor for MockExtractor {
    async fn extract(&self, image: &[u8]) -> Result<Embedding, AttendanceError> {
        vectors::from_image(image).ok_or(AttendanceError::NoFaceDetected)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_employee(name: &str, facility_id: i32) -> Employee {
    let now = Utc::now();
    Employee {
        id: EmployeeId(Uuid::now_v7()),
        name: name.to_owned(),
        facility_id: FacilityId(facility_id),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn settings() -> RecognitionSettings {
    RecognitionSettings {
        tolerance: 0.6,
        embedding_dim: TEST_DIM,
        encoding_cap: EncodingCap::Unbounded,
    }
}

pub fn enroll_usecase(
    repo: &MemoryRepo,
    settings: RecognitionSettings,
) -> EnrollFaceUseCase<MemoryRepo, MemoryRepo, MockExtractor> {
    EnrollFaceUseCase {
        employees: repo.clone(),
        encodings: repo.clone(),
        extractor: MockExtractor,
        settings,
    }
}

pub fn recognize_usecase(
    repo: &MemoryRepo,
    settings: RecognitionSettings,
) -> RecognizeUseCase<MemoryRepo, MemoryRepo, MockExtractor> {
    RecognizeUseCase {
        encodings: repo.clone(),
        events: repo.clone(),
        extractor: MockExtractor,
        settings,
    }
}

pub async fn enroll(repo: &MemoryRepo, employee: &Employee, face: &Embedding) {
    enroll_usecase(repo, settings())
        .execute(EnrollFaceInput {
            employee_id: employee.id,
            image: vectors::as_image(face),
        })
        .await
        .unwrap();
}

pub async fn check(
    usecase: &RecognizeUseCase<MemoryRepo, MemoryRepo, MockExtractor>,
    face: &Embedding,
    facility_id: Option<i32>,
) -> Result<RecognitionOutcome, AttendanceError> {
    usecase
        .execute(RecognizeInput {
            image: vectors::as_image(face),
            facility_id: facility_id.map(FacilityId),
        })
        .await
}
