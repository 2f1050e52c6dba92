//! Configuration parameters for the analyser engine

use serde::{Deserialize, Serialize};

use crate::error::AnalyserError;
use crate::preprocessing::channel_mixer::ChannelMixMode;

/// Smallest supported transform size
pub const MIN_FFT_SIZE: usize = 32;

/// Largest supported transform size
pub const MAX_FFT_SIZE: usize = 32768;

/// Analyser configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserConfig {
    // Transform
    /// Transform size N (default: 1024)
    /// Must be a power of two in [32, 32768]
    pub fft_size: usize,

    /// Weight given to the previous smoothed value, in [0, 1] (default: 0.5)
    pub smoothing_time_constant: f32,

    // Output range
    /// Decibel value mapped to byte 0 (default: -100.0)
    pub min_decibels: f32,

    /// Decibel value mapped to byte 255 (default: -12.0)
    pub max_decibels: f32,

    // History
    /// Ring buffer capacity C in samples (default: 32768)
    /// Must be a power of two and at least `fft_size`
    pub history_capacity: usize,

    /// Sample rate in Hz (default: 44100)
    pub sample_rate: u32,

    /// Samples per processing quantum (default: 128)
    pub block_size: usize,

    /// How multi-channel quanta are folded into the analysed channel (default: Average)
    pub channel_mix: ChannelMixMode,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            smoothing_time_constant: 0.5,
            min_decibels: -100.0,
            max_decibels: -12.0,
            history_capacity: MAX_FFT_SIZE,
            sample_rate: 44100,
            block_size: 128,
            channel_mix: ChannelMixMode::Average,
        }
    }
}

impl AnalyserConfig {
    /// Check every parameter against its allowed range
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidConfiguration` naming the first offending field
    pub fn validate(&self) -> Result<(), AnalyserError> {
        if !self.fft_size.is_power_of_two()
            || self.fft_size < MIN_FFT_SIZE
            || self.fft_size > MAX_FFT_SIZE
        {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "fft_size must be a power of two in [{}, {}], got {}",
                MIN_FFT_SIZE, MAX_FFT_SIZE, self.fft_size
            )));
        }

        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            // NaN also lands here
            return Err(AnalyserError::InvalidConfiguration(format!(
                "smoothing_time_constant must be in [0, 1], got {}",
                self.smoothing_time_constant
            )));
        }

        if !self.min_decibels.is_finite() || !self.max_decibels.is_finite() {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "decibel range must be finite, got [{}, {}]",
                self.min_decibels, self.max_decibels
            )));
        }

        if self.min_decibels >= self.max_decibels {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }

        if self.max_decibels > 0.0 {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "max_decibels must be <= 0, got {}",
                self.max_decibels
            )));
        }

        if !self.history_capacity.is_power_of_two() || self.history_capacity < self.fft_size {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "history_capacity must be a power of two >= fft_size ({}), got {}",
                self.fft_size, self.history_capacity
            )));
        }

        if self.sample_rate == 0 {
            return Err(AnalyserError::InvalidConfiguration(
                "sample_rate must be > 0".to_string(),
            ));
        }

        if self.block_size == 0 || self.block_size > self.history_capacity {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "block_size must be in [1, {}], got {}",
                self.history_capacity, self.block_size
            )));
        }

        Ok(())
    }

    /// Number of frequency bins produced per analysis (N/2)
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Centre frequency in Hz of bin `k`
    pub fn bin_frequency(&self, k: usize) -> f32 {
        k as f32 * self.sample_rate as f32 / self.fft_size as f32
    }
}
