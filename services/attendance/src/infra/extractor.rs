use std::time::Duration;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use attendance_domain::embedding::Embedding;

use crate::domain::repository::FeatureExtractor;
use crate::error::AttendanceError;

#[derive(Serialize)]
struct RepresentRequest {
    image_base64: String,
}

#[derive(Deserialize)]
struct RepresentResponse {
    embedding: Vec<f32>,
    model_version: String,
}

/// Client for the external embedding service (`POST {base_url}/represent`).
#[derive(Clone)]
pub struct HttpFeatureExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFeatureExtractor {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build feature extractor http client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/represent", base_url.trim_end_matches('/')),
        })
    }
}

impl FeatureExtractor for HttpFeatureExtractor {
    async fn extract(&self, image: &[u8]) -> Result<Embedding, AttendanceError> {
        let request = RepresentRequest {
            image_base64: STANDARD.encode(image),
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AttendanceError::ExtractionFailed(format!("request failed: {e}")))?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::UNPROCESSABLE_ENTITY => return Err(AttendanceError::NoFaceDetected),
            status => {
                tracing::warn!(%status, "feature extractor returned unexpected status");
                return Err(AttendanceError::ExtractionFailed(format!(
                    "extractor returned {status}"
                )));
            }
        }

        let body: RepresentResponse = resp
            .json()
            .await
            .map_err(|e| AttendanceError::ExtractionFailed(format!("invalid response: {e}")))?;
        if body.embedding.is_empty() {
            return Err(AttendanceError::ExtractionFailed("empty embedding".into()));
        }
        let embedding = Embedding::new(body.embedding, body.model_version);
        // Out-of-range JSON numbers decode to infinity in f32.
        if !embedding.is_finite() {
            return Err(AttendanceError::ExtractionFailed(
                "embedding has non-finite components".into(),
            ));
        }
        Ok(embedding)
    }
}
