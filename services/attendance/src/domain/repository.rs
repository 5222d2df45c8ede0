#![allow(async_fn_in_trait)]

use attendance_domain::embedding::Embedding;
use attendance_domain::id::{AccessEventId, EmployeeId, FacilityId};
use attendance_domain::matcher::Candidate;
use attendance_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{
    AccessEvent, AccessEventFilter, Employee, EmployeeChanges, Encoding, EncodingCap,
};
use crate::error::AttendanceError;

/// Repository for employee records.
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, AttendanceError>;

    async fn create(&self, employee: &Employee) -> Result<(), AttendanceError>;

    /// Apply the present fields and bump `updated_at`. `false` when no such employee.
    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, AttendanceError>;

    /// Remove the employee together with their encodings and access events.
    /// `false` when no such employee.
    async fn delete(&self, id: EmployeeId) -> Result<bool, AttendanceError>;

    /// Employees ordered by creation time, optionally scoped to one facility.
    async fn list(
        &self,
        facility_id: Option<FacilityId>,
        page: PageRequest,
    ) -> Result<Vec<Employee>, AttendanceError>;
}

/// Per-employee enrollment sets.
pub trait EncodingRepository: Send + Sync {
    /// Append an encoding, then evict the employee's oldest encodings beyond `cap`.
    async fn enroll(&self, encoding: &Encoding, cap: EncodingCap) -> Result<(), AttendanceError>;

    /// Every active employee (optionally in one facility) that has at least one
    /// encoding produced by `model_version`, with all of those vectors.
    async fn candidates(
        &self,
        facility_id: Option<FacilityId>,
        model_version: &str,
    ) -> Result<Vec<Candidate>, AttendanceError>;

    /// Delete all encodings of an employee. Returns the number removed.
    async fn delete_for_employee(&self, employee_id: EmployeeId) -> Result<u64, AttendanceError>;
}

/// Append-only audit trail of access events.
pub trait AccessEventRepository: Send + Sync {
    /// The max-timestamp event of an employee.
    async fn latest(&self, employee_id: EmployeeId) -> Result<Option<AccessEvent>, AttendanceError>;

    /// Write `event` and the reinforcement encoding atomically.
    ///
    /// Compare-and-swap on the employee's latest event: when it is no longer
    /// `expected_last`, nothing is written and `AttendanceError::Conflict` is returned.
    async fn create_with_reinforcement(
        &self,
        event: &AccessEvent,
        reinforcement: &Encoding,
        cap: EncodingCap,
        expected_last: Option<AccessEventId>,
    ) -> Result<(), AttendanceError>;

    async fn list(
        &self,
        filter: AccessEventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<AccessEvent>, AttendanceError>;
}

/// External image → embedding collaborator.
pub trait FeatureExtractor: Send + Sync {
    /// Fails with `NoFaceDetected` or `ExtractionFailed`.
    async fn extract(&self, image: &[u8]) -> Result<Embedding, AttendanceError>;
}
