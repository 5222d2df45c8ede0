use chrono::Utc;
use uuid::Uuid;

use attendance_domain::id::{EmployeeId, EncodingId};

use crate::domain::repository::{EmployeeRepository, EncodingRepository, FeatureExtractor};
use crate::domain::types::{Encoding, RecognitionSettings};
use crate::error::AttendanceError;

// ── EnrollFace ───────────────────────────────────────────────────────────────

pub struct EnrollFaceInput {
    pub employee_id: EmployeeId,
    pub image: Vec<u8>,
}

/// Explicit registration of a face. Never touches the audit log.
pub struct EnrollFaceUseCase<E, C, X>
where
    E: EmployeeRepository,
    C: EncodingRepository,
    X: FeatureExtractor,
{
    pub employees: E,
    pub encodings: C,
    pub extractor: X,
    pub settings: RecognitionSettings,
}

impl<E, C, X> EnrollFaceUseCase<E, C, X>
where
    E: EmployeeRepository,
    C: EncodingRepository,
    X: FeatureExtractor,
{
    pub async fn execute(&self, input: EnrollFaceInput) -> Result<EncodingId, AttendanceError> {
        self.employees
            .find_by_id(input.employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound)?;

        let embedding = self.extractor.extract(&input.image).await?;
        embedding.ensure_dimension(self.settings.embedding_dim)?;

        let encoding = Encoding {
            id: EncodingId(Uuid::now_v7()),
            employee_id: input.employee_id,
            embedding,
            created_at: Utc::now(),
        };
        self.encodings
            .enroll(&encoding, self.settings.encoding_cap)
            .await?;

        tracing::info!(
            employee_id = %input.employee_id,
            encoding_id = %encoding.id,
            model_version = %encoding.embedding.model_version,
            "face enrolled"
        );
        Ok(encoding.id)
    }
}

// ── RemoveFaces ──────────────────────────────────────────────────────────────

pub struct RemoveFacesUseCase<E: EmployeeRepository, C: EncodingRepository> {
    pub employees: E,
    pub encodings: C,
}

impl<E: EmployeeRepository, C: EncodingRepository> RemoveFacesUseCase<E, C> {
    /// Returns the number of encodings deleted.
    pub async fn execute(&self, employee_id: EmployeeId) -> Result<u64, AttendanceError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound)?;
        let removed = self.encodings.delete_for_employee(employee_id).await?;
        tracing::info!(employee_id = %employee_id, removed, "face encodings removed");
        Ok(removed)
    }
}
