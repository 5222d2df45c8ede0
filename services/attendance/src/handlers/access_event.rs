use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attendance_domain::event::EventKind;
use attendance_domain::id::{EmployeeId, FacilityId};
use attendance_domain::pagination::{PageRequest, Sort};
use attendance_identity::CallerContext;

use crate::domain::types::{AccessEvent, AccessEventFilter};
use crate::error::AttendanceError;
use crate::state::AppState;
use crate::usecase::access_event::ListAccessEventsUseCase;

#[derive(Serialize)]
pub struct AccessEventResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub facility_id: Option<i32>,
    pub kind: EventKind,
    pub distance: f32,
    #[serde(serialize_with = "attendance_core::serde::to_rfc3339_ms")]
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

impl From<AccessEvent> for AccessEventResponse {
    fn from(event: AccessEvent) -> Self {
        Self {
            id: event.id.0,
            employee_id: event.employee_id.0,
            facility_id: event.facility_id.map(|f| f.0),
            kind: event.kind,
            distance: event.distance,
            occurred_at: event.occurred_at,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AccessEventListQuery {
    pub employee_id: Option<Uuid>,
    pub facility_id: Option<i32>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

// ── GET /access-events ───────────────────────────────────────────────────────

/// Newest first unless `sort=asc`.
pub async fn list_access_events(
    _caller: CallerContext,
    State(state): State<AppState>,
    Query(query): Query<AccessEventListQuery>,
) -> Result<Json<Vec<AccessEventResponse>>, AttendanceError> {
    let sort = query
        .sort
        .as_deref()
        .and_then(Sort::from_kebab_case)
        .unwrap_or_default();
    let filter = AccessEventFilter {
        employee_id: query.employee_id.map(EmployeeId),
        facility_id: query.facility_id.map(FacilityId),
    };

    let usecase = ListAccessEventsUseCase {
        repo: state.access_event_repo(),
    };
    let events = usecase
        .execute(filter, sort, PageRequest::new(query.per_page, query.page))
        .await?;
    Ok(Json(events.into_iter().map(AccessEventResponse::from).collect()))
}
