//! # Stratum Analyser
//!
//! A real-time frequency-domain audio analyser with the behaviour of a
//! standard analyser node: feed it a continuous mono sample stream and, on
//! demand, read smoothed decibel spectra as floats or bytes.
//!
//! ## Features
//!
//! - **Rolling history**: power-of-two circular buffer of the most recent samples
//! - **Blackman-windowed FFT**: planned once per transform size (32 to 32768 points)
//! - **Temporal smoothing**: per-bin exponential moving average across requests
//! - **Output scaling**: decibels, or bytes over a configurable `[min, max]` dB range
//! - **Down-mixing**: multi-channel quanta folded to the analysed channel
//!
//! ## Quick Start
//!
//! ```
//! use stratum_analyser::{AnalyserConfig, AnalyserEngine};
//!
//! let mut engine = AnalyserEngine::new(AnalyserConfig::default())?;
//!
//! // Audio callback: one 128-sample quantum at a time
//! let quantum = vec![0.0f32; 128];
//! engine.ingest(&quantum)?;
//!
//! // Render loop: once per frame
//! let mut bars = vec![0u8; engine.frequency_bin_count()];
//! engine.get_byte_frequency_data(&mut bars)?;
//! # Ok::<(), stratum_analyser::AnalyserError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ingest → RingHistoryBuffer → window → FFT → smoothing → dB → float / byte output
//! ```
//!
//! Pacing (how often to ingest and read) belongs to the host; see [`scheduler`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;
pub mod scheduler;

// Re-export main types
pub use analysis::engine::AnalyserEngine;
pub use analysis::shared::SharedAnalyser;
pub use config::AnalyserConfig;
pub use error::AnalyserError;
pub use io::ring_buffer::RingHistoryBuffer;
pub use preprocessing::channel_mixer::ChannelMixMode;
