//! Error types for terrain generation

use thiserror::Error;

use crate::tile::HeightBand;
use crate::world::Stage;

/// Invalid generator parameters, detected before or during classification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("map dimensions must be positive (got {width}x{height})")]
    NonPositiveDimension { width: usize, height: usize },

    #[error("band table needs at least one band")]
    EmptyBandTable,

    #[error("{thresholds} thresholds need {} bands, got {bands}", .thresholds + 1)]
    BandCountMismatch { thresholds: usize, bands: usize },

    #[error("threshold {index} ({value}) must lie strictly between 0 and 1")]
    ThresholdOutOfRange { index: usize, value: f32 },

    #[error("thresholds must be strictly increasing: [{index}] = {next} after {prev}")]
    ThresholdsNotIncreasing { index: usize, prev: f32, next: f32 },

    #[error("band table may not contain {0:?}; it is reserved for carved rivers")]
    ReservedBand(HeightBand),

    #[error("river width range {min}..={max} must lie within 1..=4")]
    InvalidRiverWidth { min: u8, max: u8 },

    #[error("river step bound must be at least 1")]
    ZeroStepBound,

    #[error("noise needs at least one octave")]
    ZeroOctaves,

    #[error("noise frequency must be positive (got {0})")]
    NonPositiveFrequency(f64),

    #[error("noise {name} must be finite and positive (got {value})")]
    InvalidNoiseParameter { name: &'static str, value: f64 },

    #[error("height field is flat (every sample is {value}), cannot normalize")]
    FlatHeightField { value: f32 },
}

/// Main error type for the generator
#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot run {requested} before {required} (pipeline is at {current})")]
    StageOrder {
        requested: Stage,
        required: Stage,
        current: Stage,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
