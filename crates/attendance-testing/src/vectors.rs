//! Deterministic embeddings for matcher and orchestrator tests.

use attendance_domain::embedding::Embedding;

pub const TEST_MODEL: &str = "test-model-v1";
pub const TEST_DIM: usize = 128;

/// Vector with `1.0` at `axis` and zeros elsewhere. Distinct axes are `sqrt(2)` apart.
pub fn axis(axis: usize) -> Embedding {
    let mut values = vec![0.0; TEST_DIM];
    values[axis % TEST_DIM] = 1.0;
    Embedding::new(values, TEST_MODEL)
}

/// `base` shifted by `offset` along its first component.
pub fn nudged(base: &Embedding, offset: f32) -> Embedding {
    let mut values = base.values.clone();
    values[0] += offset;
    Embedding::new(values, base.model_version.clone())
}

/// Pseudo-random but reproducible vector for `seed`.
pub fn seeded(seed: u32) -> Embedding {
    let values = (0..TEST_DIM)
        .map(|i| ((seed as f32 + 1.0) * (i as f32 + 0.5)).sin() * 0.25)
        .collect();
    Embedding::new(values, TEST_MODEL)
}

/// Encode a vector as the "image" the mock extractor understands.
pub fn as_image(embedding: &Embedding) -> Vec<u8> {
    embedding
        .values
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

/// Inverse of [`as_image`]. Returns `None` when the bytes are not a whole number of f32s.
pub fn from_image(bytes: &[u8]) -> Option<Embedding> {
    if bytes.is_empty() || bytes.len() % 4 != 0 {
        return None;
    }
    let values = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Some(Embedding::new(values, TEST_MODEL))
}
