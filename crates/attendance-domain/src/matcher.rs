//! Brute-force nearest-neighbour matching of a probe embedding against
//! enrolled employees.

use crate::embedding::{DimensionMismatch, Embedding, euclidean_distance};
use crate::id::EmployeeId;

/// One matchable employee with every enrolled vector.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub employee_id: EmployeeId,
    pub name: String,
    pub vectors: Vec<Vec<f32>>,
}

/// Result of matching a probe against a candidate set.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// No candidate had a single vector to compare against.
    NoCandidates,
    /// The closest candidate is farther than the tolerance.
    NotRecognized { best_distance: f32 },
    Recognized {
        employee_id: EmployeeId,
        name: String,
        distance: f32,
    },
}

/// Strategy for comparing a probe embedding against enrolled employees.
pub trait Matcher {
    fn find_best(
        &self,
        probe: &Embedding,
        candidates: &[Candidate],
        tolerance: f32,
    ) -> Result<MatchOutcome, DimensionMismatch>;
}

/// Euclidean (L2) nearest-neighbour matcher.
///
/// An employee's distance is the minimum over all of their vectors. The global
/// winner is the employee with the smallest distance; exact ties go to the
/// lowest employee id so the result never depends on candidate order. A
/// winner at exactly `tolerance` is accepted. Stored vectors that yield a
/// non-finite distance are skipped with a warning naming the employee.
pub struct EuclideanMatcher;

impl Matcher for EuclideanMatcher {
    fn find_best(
        &self,
        probe: &Embedding,
        candidates: &[Candidate],
        tolerance: f32,
    ) -> Result<MatchOutcome, DimensionMismatch> {
        let mut best: Option<(&Candidate, f32)> = None;

        for candidate in candidates {
            let mut own_best: Option<f32> = None;
            for vector in &candidate.vectors {
                let d = euclidean_distance(&probe.values, vector)?;
                if !d.is_finite() {
                    tracing::warn!(
                        employee_id = %candidate.employee_id,
                        "skipping stored encoding with non-finite distance"
                    );
                    continue;
                }
                own_best = Some(own_best.map_or(d, |b| b.min(d)));
            }
            let Some(distance) = own_best else {
                continue;
            };

            let is_better = match best {
                None => true,
                Some((prev, prev_distance)) => {
                    distance < prev_distance
                        || (distance == prev_distance && candidate.employee_id < prev.employee_id)
                }
            };
            if is_better {
                best = Some((candidate, distance));
            }
        }

        Ok(match best {
            None => MatchOutcome::NoCandidates,
            Some((_, distance)) if distance > tolerance => MatchOutcome::NotRecognized {
                best_distance: distance,
            },
            Some((candidate, distance)) => MatchOutcome::Recognized {
                employee_id: candidate.employee_id,
                name: candidate.name.clone(),
                distance,
            },
        })
    }
}
