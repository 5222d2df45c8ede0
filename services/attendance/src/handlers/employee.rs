use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attendance_domain::event::{EventKind, Presence};
use attendance_domain::id::{EmployeeId, FacilityId};
use attendance_domain::pagination::PageRequest;
use attendance_identity::CallerContext;

use crate::domain::types::{Employee, EmployeeChanges};
use crate::error::AttendanceError;
use crate::state::AppState;
use crate::usecase::employee::{
    CreateEmployeeInput, CreateEmployeeUseCase, DeleteEmployeeUseCase, GetPresenceUseCase,
    ListEmployeesUseCase, UpdateEmployeeUseCase,
};
use crate::usecase::enrollment::RemoveFacesUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub name: String,
    pub facility_id: i32,
    pub is_active: bool,
    #[serde(serialize_with = "attendance_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "attendance_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.0,
            name: employee.name,
            facility_id: employee.facility_id.0,
            is_active: employee.is_active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct PresenceResponse {
    pub employee_id: Uuid,
    pub presence: Presence,
    pub last_event: Option<EventKind>,
    #[serde(serialize_with = "attendance_core::serde::opt_to_rfc3339_ms")]
    pub last_event_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ── POST /employees ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub facility_id: i32,
}

#[derive(Serialize)]
pub struct CreateEmployeeResponse {
    pub employee_id: Uuid,
}

pub async fn create_employee(
    _caller: CallerContext,
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<CreateEmployeeResponse>), AttendanceError> {
    let usecase = CreateEmployeeUseCase {
        repo: state.employee_repo(),
    };
    let employee = usecase
        .execute(CreateEmployeeInput {
            name: body.name,
            facility_id: FacilityId(body.facility_id),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEmployeeResponse {
            employee_id: employee.id.0,
        }),
    ))
}

// ── GET /employees ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EmployeeListQuery {
    pub facility_id: Option<i32>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_employees(
    _caller: CallerContext,
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, AttendanceError> {
    let usecase = ListEmployeesUseCase {
        repo: state.employee_repo(),
    };
    let employees = usecase
        .execute(
            query.facility_id.map(FacilityId),
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

// ── PATCH /employees/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub facility_id: Option<i32>,
    pub is_active: Option<bool>,
}

pub async fn update_employee(
    _caller: CallerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> Result<StatusCode, AttendanceError> {
    let usecase = UpdateEmployeeUseCase {
        repo: state.employee_repo(),
    };
    usecase
        .execute(
            EmployeeId(id),
            EmployeeChanges {
                name: body.name,
                facility_id: body.facility_id.map(FacilityId),
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /employees/{id} ───────────────────────────────────────────────────

pub async fn delete_employee(
    _caller: CallerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AttendanceError> {
    let usecase = DeleteEmployeeUseCase {
        repo: state.employee_repo(),
    };
    usecase.execute(EmployeeId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /employees/{id}/presence ─────────────────────────────────────────────

pub async fn get_presence(
    _caller: CallerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PresenceResponse>, AttendanceError> {
    let usecase = GetPresenceUseCase {
        employees: state.employee_repo(),
        events: state.access_event_repo(),
    };
    let output = usecase.execute(EmployeeId(id)).await?;
    Ok(Json(PresenceResponse {
        employee_id: id,
        presence: output.presence,
        last_event: output.last_event.as_ref().map(|e| e.kind),
        last_event_at: output.last_event.map(|e| e.occurred_at),
    }))
}

// ── DELETE /employees/{id}/faces ─────────────────────────────────────────────

pub async fn remove_faces(
    _caller: CallerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AttendanceError> {
    let usecase = RemoveFacesUseCase {
        employees: state.employee_repo(),
        encodings: state.encoding_repo(),
    };
    usecase.execute(EmployeeId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
