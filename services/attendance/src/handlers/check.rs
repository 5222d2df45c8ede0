use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attendance_domain::event::EventKind;
use attendance_domain::id::FacilityId;
use attendance_identity::CallerContext;

use crate::error::AttendanceError;
use crate::handlers::decode_image;
use crate::state::AppState;
use crate::usecase::recognition::{RecognitionOutcome, RecognizeInput, RecognizeUseCase};

// ── POST /check ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckRequest {
    pub image_base64: String,
    pub facility_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Recognized,
    NotRecognized,
    NoCandidates,
}

/// `recognized:false` covers both negative outcomes; `outcome` tells them apart.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub recognized: bool,
    pub outcome: CheckOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventKind>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "attendance_core::serde::opt_to_rfc3339_ms"
    )]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl CheckResponse {
    fn rejected(outcome: CheckOutcome) -> Self {
        Self {
            recognized: false,
            outcome,
            employee_id: None,
            name: None,
            distance: None,
            event: None,
            timestamp: None,
        }
    }
}

impl From<RecognitionOutcome> for CheckResponse {
    fn from(outcome: RecognitionOutcome) -> Self {
        match outcome {
            RecognitionOutcome::NoCandidates => Self::rejected(CheckOutcome::NoCandidates),
            RecognitionOutcome::NotRecognized { .. } => Self::rejected(CheckOutcome::NotRecognized),
            RecognitionOutcome::Recognized {
                employee_id,
                name,
                distance,
                event,
                timestamp,
                ..
            } => Self {
                recognized: true,
                outcome: CheckOutcome::Recognized,
                employee_id: Some(employee_id.0),
                name: Some(name),
                distance: Some(distance),
                event: Some(event),
                timestamp: Some(timestamp),
            },
        }
    }
}

pub async fn check(
    _caller: CallerContext,
    State(state): State<AppState>,
    Json(body): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, AttendanceError> {
    let image = decode_image(&body.image_base64)?;
    let usecase = RecognizeUseCase {
        encodings: state.encoding_repo(),
        events: state.access_event_repo(),
        extractor: state.extractor.clone(),
        settings: state.settings,
    };
    let outcome = usecase
        .execute(RecognizeInput {
            image,
            facility_id: body.facility_id.map(FacilityId),
        })
        .await?;
    Ok(Json(CheckResponse::from(outcome)))
}
