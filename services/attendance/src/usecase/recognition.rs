use chrono::{DateTime, Utc};
use uuid::Uuid;

use attendance_domain::event::EventKind;
use attendance_domain::id::{AccessEventId, EmployeeId, EncodingId, FacilityId};
use attendance_domain::matcher::{EuclideanMatcher, MatchOutcome, Matcher};

use crate::domain::repository::{AccessEventRepository, EncodingRepository, FeatureExtractor};
use crate::domain::types::{AccessEvent, Encoding, RecognitionSettings};
use crate::error::AttendanceError;

/// Extra attempts after the first lost compare-and-swap.
const CONFLICT_RETRIES: usize = 1;

pub struct RecognizeInput {
    pub image: Vec<u8>,
    pub facility_id: Option<FacilityId>,
}

/// Result of one `check`. Only `Recognized` has written anything.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    NoCandidates,
    NotRecognized {
        best_distance: f32,
    },
    Recognized {
        employee_id: EmployeeId,
        name: String,
        distance: f32,
        event: EventKind,
        event_id: AccessEventId,
        timestamp: DateTime<Utc>,
    },
}

impl RecognitionOutcome {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized { .. })
    }
}

/// Extract → match → decide IN/OUT → write event + reinforcement encoding.
pub struct RecognizeUseCase<C, A, X>
where
    C: EncodingRepository,
    A: AccessEventRepository,
    X: FeatureExtractor,
{
    pub encodings: C,
    pub events: A,
    pub extractor: X,
    pub settings: RecognitionSettings,
}

impl<C, A, X> RecognizeUseCase<C, A, X>
where
    C: EncodingRepository,
    A: AccessEventRepository,
    X: FeatureExtractor,
{
    pub async fn execute(&self, input: RecognizeInput) -> Result<RecognitionOutcome, AttendanceError> {
        let probe = self.extractor.extract(&input.image).await?;
        probe.ensure_dimension(self.settings.embedding_dim)?;

        let candidates = self
            .encodings
            .candidates(input.facility_id, &probe.model_version)
            .await?;
        let matched = EuclideanMatcher.find_best(&probe, &candidates, self.settings.tolerance)?;

        let (employee_id, name, distance) = match matched {
            MatchOutcome::NoCandidates => {
                tracing::debug!(facility_id = ?input.facility_id, "no candidates to match against");
                return Ok(RecognitionOutcome::NoCandidates);
            }
            MatchOutcome::NotRecognized { best_distance } => {
                tracing::debug!(
                    facility_id = ?input.facility_id,
                    best_distance,
                    tolerance = self.settings.tolerance,
                    "face not recognized"
                );
                return Ok(RecognitionOutcome::NotRecognized { best_distance });
            }
            MatchOutcome::Recognized {
                employee_id,
                name,
                distance,
            } => (employee_id, name, distance),
        };

        let reinforcement = Encoding {
            id: EncodingId(Uuid::now_v7()),
            employee_id,
            embedding: probe,
            created_at: Utc::now(),
        };

        // Optimistic: the read is unlocked and the write compares against it.
        for attempt in 0..=CONFLICT_RETRIES {
            let last = self.events.latest(employee_id).await?;
            let kind = EventKind::next_after(last.as_ref().map(|e| e.kind));
            let event = AccessEvent {
                id: AccessEventId(Uuid::now_v7()),
                employee_id,
                facility_id: input.facility_id,
                kind,
                distance,
                occurred_at: Utc::now(),
            };

            match self
                .events
                .create_with_reinforcement(
                    &event,
                    &reinforcement,
                    self.settings.encoding_cap,
                    last.map(|e| e.id),
                )
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        employee_id = %employee_id,
                        facility_id = ?input.facility_id,
                        distance,
                        event = %kind,
                        "employee recognized"
                    );
                    return Ok(RecognitionOutcome::Recognized {
                        employee_id,
                        name,
                        distance,
                        event: kind,
                        event_id: event.id,
                        timestamp: event.occurred_at,
                    });
                }
                Err(AttendanceError::Conflict) => {
                    tracing::warn!(employee_id = %employee_id, attempt, "access event conflict");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AttendanceError::Conflict)
    }
}
