pub mod options;
pub mod predict;
pub mod rng;
pub mod sampler;
pub mod scoring;

pub use options::PredictionOptions;
pub use predict::{
    estimate_next_draw, CombinationProbability, NumberProbability, PredictionResult,
};
pub use scoring::MIN_DRAWS;
