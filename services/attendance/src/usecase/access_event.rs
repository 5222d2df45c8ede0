use attendance_domain::pagination::{PageRequest, Sort};

use crate::domain::repository::AccessEventRepository;
use crate::domain::types::{AccessEvent, AccessEventFilter};
use crate::error::AttendanceError;

// ── ListAccessEvents ─────────────────────────────────────────────────────────

pub struct ListAccessEventsUseCase<R: AccessEventRepository> {
    pub repo: R,
}

impl<R: AccessEventRepository> ListAccessEventsUseCase<R> {
    pub async fn execute(
        &self,
        filter: AccessEventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<AccessEvent>, AttendanceError> {
        self.repo.list(filter, sort, page.clamped()).await
    }
}
