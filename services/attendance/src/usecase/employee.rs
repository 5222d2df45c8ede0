use chrono::Utc;
use uuid::Uuid;

use attendance_domain::event::Presence;
use attendance_domain::id::{EmployeeId, FacilityId};
use attendance_domain::pagination::PageRequest;

use crate::domain::repository::{AccessEventRepository, EmployeeRepository};
use crate::domain::types::{AccessEvent, Employee, EmployeeChanges};
use crate::error::AttendanceError;

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeInput {
    pub name: String,
    pub facility_id: FacilityId,
}

pub struct CreateEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> CreateEmployeeUseCase<R> {
    pub async fn execute(&self, input: CreateEmployeeInput) -> Result<Employee, AttendanceError> {
        let now = Utc::now();
        let employee = Employee {
            id: EmployeeId(Uuid::now_v7()),
            name: input.name,
            facility_id: input.facility_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&employee).await?;
        tracing::info!(employee_id = %employee.id, facility_id = %employee.facility_id, "employee created");
        Ok(employee)
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> ListEmployeesUseCase<R> {
    pub async fn execute(
        &self,
        facility_id: Option<FacilityId>,
        page: PageRequest,
    ) -> Result<Vec<Employee>, AttendanceError> {
        self.repo.list(facility_id, page.clamped()).await
    }
}

// ── UpdateEmployee ───────────────────────────────────────────────────────────

pub struct UpdateEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> UpdateEmployeeUseCase<R> {
    /// Deactivation takes effect on the next candidate query.
    pub async fn execute(
        &self,
        employee_id: EmployeeId,
        changes: EmployeeChanges,
    ) -> Result<(), AttendanceError> {
        if changes.is_empty() {
            return Err(AttendanceError::MissingData);
        }
        if !self.repo.update(employee_id, &changes).await? {
            return Err(AttendanceError::EmployeeNotFound);
        }
        tracing::info!(%employee_id, is_active = ?changes.is_active, "employee updated");
        Ok(())
    }
}

// ── DeleteEmployee ───────────────────────────────────────────────────────────

pub struct DeleteEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> DeleteEmployeeUseCase<R> {
    pub async fn execute(&self, employee_id: EmployeeId) -> Result<(), AttendanceError> {
        if !self.repo.delete(employee_id).await? {
            return Err(AttendanceError::EmployeeNotFound);
        }
        tracing::info!(%employee_id, "employee deleted");
        Ok(())
    }
}

// ── GetPresence ──────────────────────────────────────────────────────────────

pub struct PresenceOutput {
    pub presence: Presence,
    pub last_event: Option<AccessEvent>,
}

pub struct GetPresenceUseCase<E: EmployeeRepository, A: AccessEventRepository> {
    pub employees: E,
    pub events: A,
}

impl<E: EmployeeRepository, A: AccessEventRepository> GetPresenceUseCase<E, A> {
    pub async fn execute(&self, employee_id: EmployeeId) -> Result<PresenceOutput, AttendanceError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound)?;
        let last_event = self.events.latest(employee_id).await?;
        Ok(PresenceOutput {
            presence: Presence::from_last(last_event.as_ref().map(|e| e.kind)),
            last_event,
        })
    }
}
