//! Mock caller identity.
//!
//! Services behind the gateway receive `x-attendance-user-id`. Tests inject it
//! directly so no gateway is needed.

use attendance_identity::caller::CALLER_ID_HEADER;
use http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

/// Identity injected into test requests.
pub struct MockCaller {
    pub user_id: Uuid,
}

impl MockCaller {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// A scanning device registered under a random id.
    pub fn device() -> Self {
        Self::new(Uuid::new_v4())
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(CALLER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map
    }
}
