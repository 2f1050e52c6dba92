//! Spectral analysis stages
//!
//! Each stage is usable on its own; `AnalyserEngine` chains them as
//! window → transform → smoothing → decibels.

pub mod decibels;
pub mod smoothing;
pub mod transform;
pub mod window;

pub use decibels::{
    db_to_magnitude, normalize_to_byte, sample_to_byte, to_decibels, value_to_percent,
};
pub use smoothing::SmoothingState;
pub use transform::SpectrumTransform;
pub use window::{blackman, WindowTable};
