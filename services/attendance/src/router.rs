use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use attendance_core::health::healthz;
use attendance_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    access_event::list_access_events,
    check::check,
    employee::{
        create_employee, delete_employee, get_presence, list_employees, remove_faces,
        update_employee,
    },
    enrollment::enroll_face,
    health::readyz,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Employees
        .route("/employees", post(create_employee))
        .route("/employees", get(list_employees))
        .route("/employees/{id}", patch(update_employee))
        .route("/employees/{id}", delete(delete_employee))
        .route("/employees/{id}/presence", get(get_presence))
        .route("/employees/{id}/faces", delete(remove_faces))
        // Recognition
        .route("/faces", post(enroll_face))
        .route("/check", post(check))
        // Audit trail
        .route("/access-events", get(list_access_events))
        .with_state(state)
        // Last layer runs first: the request id exists before the trace span opens.
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
}
