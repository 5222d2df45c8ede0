use sea_orm::DatabaseConnection;

use crate::domain::types::RecognitionSettings;
use crate::infra::db::{DbAccessEventRepository, DbEmployeeRepository, DbEncodingRepository};
use crate::infra::extractor::HttpFeatureExtractor;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub extractor: HttpFeatureExtractor,
    pub settings: RecognitionSettings,
}

impl AppState {
    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn encoding_repo(&self) -> DbEncodingRepository {
        DbEncodingRepository {
            db: self.db.clone(),
        }
    }

    pub fn access_event_repo(&self) -> DbAccessEventRepository {
        DbAccessEventRepository {
            db: self.db.clone(),
        }
    }
}
