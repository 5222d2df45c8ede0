use chrono::{DateTime, Utc};

use attendance_domain::embedding::Embedding;
use attendance_domain::event::EventKind;
use attendance_domain::id::{AccessEventId, EmployeeId, EncodingId, FacilityId};

/// Employee registered under a facility.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub facility_id: FacilityId,
    /// Inactive employees keep their history but are never matched.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of an employee; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub facility_id: Option<FacilityId>,
    pub is_active: Option<bool>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.facility_id.is_none() && self.is_active.is_none()
    }
}

/// A stored face encoding owned by one employee.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub id: EncodingId,
    pub employee_id: EmployeeId,
    pub embedding: Embedding,
    pub created_at: DateTime<Utc>,
}

/// Immutable audit record of one successful recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessEvent {
    pub id: AccessEventId,
    pub employee_id: EmployeeId,
    pub facility_id: Option<FacilityId>,
    pub kind: EventKind,
    pub distance: f32,
    pub occurred_at: DateTime<Utc>,
}

/// Filter for the access event listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessEventFilter {
    pub employee_id: Option<EmployeeId>,
    pub facility_id: Option<FacilityId>,
}

/// How many encodings each employee retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingCap {
    #[default]
    Unbounded,
    /// Keep the most recent N; older encodings are evicted oldest-first on append.
    MostRecent(usize),
}

impl EncodingCap {
    /// `0` means unbounded.
    pub fn from_limit(limit: usize) -> Self {
        if limit == 0 {
            Self::Unbounded
        } else {
            Self::MostRecent(limit)
        }
    }

    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::MostRecent(n) => Some(n),
        }
    }
}

/// Tunables of the recognition core.
#[derive(Debug, Clone, Copy)]
pub struct RecognitionSettings {
    /// Maximum accepted Euclidean distance.
    pub tolerance: f32,
    /// Dimension every stored and probe embedding must have.
    pub embedding_dim: usize,
    pub encoding_cap: EncodingCap,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.6,
            embedding_dim: 128,
            encoding_cap: EncodingCap::Unbounded,
        }
    }
}
