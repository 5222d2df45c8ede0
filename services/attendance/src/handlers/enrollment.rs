use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attendance_domain::id::EmployeeId;
use attendance_identity::CallerContext;

use crate::error::AttendanceError;
use crate::handlers::decode_image;
use crate::state::AppState;
use crate::usecase::enrollment::{EnrollFaceInput, EnrollFaceUseCase};

// ── POST /faces ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnrollFaceRequest {
    pub employee_id: Uuid,
    pub image_base64: String,
}

#[derive(Serialize)]
pub struct EnrollFaceResponse {
    pub encoding_id: Uuid,
}

pub async fn enroll_face(
    _caller: CallerContext,
    State(state): State<AppState>,
    Json(body): Json<EnrollFaceRequest>,
) -> Result<(StatusCode, Json<EnrollFaceResponse>), AttendanceError> {
    let image = decode_image(&body.image_base64)?;
    let usecase = EnrollFaceUseCase {
        employees: state.employee_repo(),
        encodings: state.encoding_repo(),
        extractor: state.extractor.clone(),
        settings: state.settings,
    };
    let encoding_id = usecase
        .execute(EnrollFaceInput {
            employee_id: EmployeeId(body.employee_id),
            image,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollFaceResponse {
            encoding_id: encoding_id.0,
        }),
    ))
}
