use std::time::Duration;

use crate::domain::types::{EncodingCap, RecognitionSettings};

/// Attendance service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AttendanceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `ATTENDANCE_PORT`.
    pub attendance_port: u16,
    /// Base URL of the embedding service (e.g. "http://extractor:8000").
    pub feature_extractor_url: String,
    /// Per-request extractor timeout in seconds (default 10).
    pub feature_extractor_timeout_secs: u64,
    /// Maximum accepted Euclidean distance (default 0.6). Env var: `MATCH_TOLERANCE`.
    pub match_tolerance: f32,
    /// Dimension of every stored embedding (default 128). Env var: `EMBEDDING_DIM`.
    pub embedding_dim: usize,
    /// Encodings kept per employee; `0` keeps all. Env var: `MAX_ENCODINGS_PER_EMPLOYEE`.
    pub max_encodings_per_employee: usize,
}

impl AttendanceConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            attendance_port: parsed_var("ATTENDANCE_PORT").unwrap_or(3114),
            feature_extractor_url: std::env::var("FEATURE_EXTRACTOR_URL")
                .expect("FEATURE_EXTRACTOR_URL"),
            feature_extractor_timeout_secs: parsed_var("FEATURE_EXTRACTOR_TIMEOUT_SECS")
                .unwrap_or(10),
            match_tolerance: parsed_var("MATCH_TOLERANCE").unwrap_or(0.6),
            embedding_dim: parsed_var("EMBEDDING_DIM").unwrap_or(128),
            max_encodings_per_employee: parsed_var("MAX_ENCODINGS_PER_EMPLOYEE").unwrap_or(0),
        }
    }

    pub fn recognition_settings(&self) -> RecognitionSettings {
        RecognitionSettings {
            tolerance: self.match_tolerance,
            embedding_dim: self.embedding_dim,
            encoding_cap: EncodingCap::from_limit(self.max_encodings_per_employee),
        }
    }

    pub fn feature_extractor_timeout(&self) -> Duration {
        Duration::from_secs(self.feature_extractor_timeout_secs)
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
