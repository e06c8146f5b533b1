//! Tunable constants of the positioning pipeline.
//!
//! These values shape the visible map geometry. Changing any of them changes the picture, so
//! they are kept as named, versioned defaults rather than inlined numbers.

/// Exponent applied to `max(score - 1, SCORE_FLOOR)` when weighting brands for an attribute.
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEIGHT_GAMMA: f64 = 0.5;
/// Multiplier applied to the weighted centroid, pushing attributes slightly outward.
pub const DEFAULT_STRETCH: f64 = 1.15;
/// Gain on the benchmark-minus-average score difference along the ideal direction.
pub const DEFAULT_BETA_IDEAL: f64 = 1.0;
/// Minimum desired distance between two attribute markers (pre-normalization units).
pub const DEFAULT_REPEL_RADIUS: f64 = 7.0;
pub const DEFAULT_REPEL_STRENGTH: f64 = 0.7;
pub const DEFAULT_REPEL_ITERATIONS: usize = 3;
/// Keeps a score of exactly 1 from zeroing out a brand's weight.
pub const SCORE_FLOOR: f64 = 0.0001;

pub const DEFAULT_MDS_ITERATIONS: usize = 100;
pub const DEFAULT_MDS_SEED: u64 = 1;

/// Substituted for zero lengths/radii to avoid division by zero.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectorParams {
    pub weight_gamma: f64,
    pub stretch: f64,
    pub beta_ideal: f64,
    pub repel_radius: f64,
    pub repel_strength: f64,
    pub repel_iterations: usize,
}

impl Default for ProjectorParams {
    fn default() -> Self {
        Self {
            weight_gamma: DEFAULT_WEIGHT_GAMMA,
            stretch: DEFAULT_STRETCH,
            beta_ideal: DEFAULT_BETA_IDEAL,
            repel_radius: DEFAULT_REPEL_RADIUS,
            repel_strength: DEFAULT_REPEL_STRENGTH,
            repel_iterations: DEFAULT_REPEL_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MdsOptions {
    /// Fixed power-iteration budget per eigenpair.
    pub iterations: usize,
    /// Seed for the deterministic start vectors. Identical seeds reproduce identical layouts.
    pub seed: u64,
}

impl Default for MdsOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_MDS_ITERATIONS,
            seed: DEFAULT_MDS_SEED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub mds: MdsOptions,
    pub projector: ProjectorParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_named_defaults() {
        let opts: LayoutOptions =
            serde_json::from_str(r#"{"projector":{"stretch":1.3},"mds":{"seed":9}}"#)
                .expect("valid options");
        assert_eq!(opts.projector.stretch, 1.3);
        assert_eq!(opts.projector.repel_iterations, DEFAULT_REPEL_ITERATIONS);
        assert_eq!(opts.mds.seed, 9);
        assert_eq!(opts.mds.iterations, DEFAULT_MDS_ITERATIONS);
    }
}
