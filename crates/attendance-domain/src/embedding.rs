//! Face embedding vectors and their distance metric.

use serde::{Deserialize, Serialize};

/// Two vectors of different length were compared.
///
/// Never silently skipped or zero-padded: a length change means the feature
/// extractor and the stored encodings disagree on the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("embedding dimension mismatch: expected {expected}, got {actual}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// Fixed-length face embedding produced by the feature extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
    /// Extractor model that produced this vector (e.g. "dlib_resnet_v1").
    pub model_version: String,
}

impl Embedding {
    pub fn new(values: Vec<f32>, model_version: impl Into<String>) -> Self {
        Self {
            values,
            model_version: model_version.into(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// False when any component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Fail unless this vector has exactly `expected` components.
    pub fn ensure_dimension(&self, expected: usize) -> Result<(), DimensionMismatch> {
        if self.values.len() != expected {
            return Err(DimensionMismatch {
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Plain L2 norm of the difference between `self` and `other`.
    pub fn euclidean_distance(&self, other: &Embedding) -> Result<f32, DimensionMismatch> {
        euclidean_distance(&self.values, &other.values)
    }
}

/// L2 distance between two equally sized slices.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32, DimensionMismatch> {
    if a.len() != b.len() {
        return Err(DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt())
}
