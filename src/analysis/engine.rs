//! Analyser engine
//!
//! Owns the history buffer, window table, transform and smoothing state
//! for one analysed stream, and exposes the analyser-node style data
//! getters over them.
//!
//! # Example
//!
//! ```
//! use stratum_analyser::{AnalyserConfig, AnalyserEngine};
//!
//! let mut engine = AnalyserEngine::new(AnalyserConfig::default())?;
//! let quantum: Vec<f32> = (0..128).map(|i| (i as f32 * 0.1).sin()).collect();
//! engine.ingest(&quantum)?;
//!
//! let mut bytes = vec![0u8; engine.frequency_bin_count()];
//! engine.get_byte_frequency_data(&mut bytes)?;
//! # Ok::<(), stratum_analyser::AnalyserError>(())
//! ```

use crate::config::AnalyserConfig;
use crate::error::AnalyserError;
use crate::features::spectrum::{
    normalize_to_byte, sample_to_byte, to_decibels, SmoothingState, SpectrumTransform, WindowTable,
};
use crate::io::ring_buffer::RingHistoryBuffer;
use crate::preprocessing::channel_mixer::downmix_into;

/// Frequency-domain analyser over a rolling sample history
#[derive(Debug, Clone)]
pub struct AnalyserEngine {
    config: AnalyserConfig,
    history: RingHistoryBuffer,
    window: WindowTable,
    transform: SpectrumTransform,
    smoothing: SmoothingState,
    /// Scratch: windowed time-domain frame (N)
    frame: Vec<f32>,
    /// Scratch: raw magnitudes of the latest frame (N/2)
    magnitudes: Vec<f32>,
    /// Scratch: down-mixed quantum
    mix: Vec<f32>,
}

impl AnalyserEngine {
    /// Validate `config` and allocate every buffer it implies
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidConfiguration` if any parameter is out of range
    pub fn new(config: AnalyserConfig) -> Result<Self, AnalyserError> {
        config.validate()?;

        let n = config.fft_size;
        let engine = Self {
            history: RingHistoryBuffer::new(config.history_capacity)?,
            window: WindowTable::build(n),
            transform: SpectrumTransform::new(n)?,
            smoothing: SmoothingState::new(n / 2, config.smoothing_time_constant),
            frame: vec![0.0; n],
            magnitudes: vec![0.0; n / 2],
            mix: Vec::with_capacity(config.block_size),
            config,
        };

        log::debug!(
            "Analyser ready: fft_size={}, smoothing={:.2}, range=[{:.1}, {:.1}] dB, history={}, {} Hz",
            engine.config.fft_size,
            engine.config.smoothing_time_constant,
            engine.config.min_decibels,
            engine.config.max_decibels,
            engine.config.history_capacity,
            engine.config.sample_rate
        );

        Ok(engine)
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Transform size N
    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Number of frequency bins (N/2)
    pub fn frequency_bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    /// Current smoothed linear magnitudes, one per bin
    pub fn smoothed_magnitudes(&self) -> &[f32] {
        self.smoothing.values()
    }

    /// Apply a new configuration
    ///
    /// A changed transform size rebuilds the window, transform and smoothing
    /// state; a changed history capacity discards the history. Other fields
    /// take effect without touching accumulated state. On error the engine
    /// keeps its previous configuration.
    pub fn reconfigure(&mut self, config: AnalyserConfig) -> Result<(), AnalyserError> {
        config.validate()?;

        if config.history_capacity != self.config.history_capacity {
            log::warn!(
                "History capacity changed {} -> {}, discarding buffered samples",
                self.config.history_capacity,
                config.history_capacity
            );
            self.history = RingHistoryBuffer::new(config.history_capacity)?;
        }

        let n = config.fft_size;
        if n != self.config.fft_size {
            log::debug!("Transform size changed {} -> {}", self.config.fft_size, n);
            self.transform = SpectrumTransform::new(n)?;
            self.window = WindowTable::build(n);
            self.smoothing = SmoothingState::new(n / 2, config.smoothing_time_constant);
            self.frame = vec![0.0; n];
            self.magnitudes = vec![0.0; n / 2];
        } else {
            self.smoothing.set_time_constant(config.smoothing_time_constant);
        }

        self.config = config;
        Ok(())
    }

    /// Append a mono block to the history
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::BlockTooLarge` if the block exceeds the history capacity
    pub fn ingest(&mut self, block: &[f32]) -> Result<(), AnalyserError> {
        self.history.ingest(block)?;
        log::trace!(
            "Ingested {} samples, cursor at {}",
            block.len(),
            self.history.offset()
        );
        Ok(())
    }

    /// Down-mix planar channels per the configured mode, then ingest
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidInput` for an empty or ragged channel set,
    /// or `AnalyserError::BlockTooLarge` as for [`ingest`](Self::ingest)
    pub fn ingest_channels(&mut self, channels: &[&[f32]]) -> Result<(), AnalyserError> {
        downmix_into(channels, self.config.channel_mix, &mut self.mix)?;
        self.history.ingest(&self.mix)?;
        log::trace!(
            "Ingested {} channels x {} samples, cursor at {}",
            channels.len(),
            self.mix.len(),
            self.history.offset()
        );
        Ok(())
    }

    /// Copy the N most recent samples into `out`, oldest first
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` unless `out.len() == N`
    pub fn get_float_time_domain_data(&self, out: &mut [f32]) -> Result<(), AnalyserError> {
        self.check_len(out.len(), self.config.fft_size)?;
        self.history.read_window(out)
    }

    /// Byte waveform of the N most recent samples, 128 at zero crossing
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` unless `out.len() == N`
    pub fn get_byte_time_domain_data(&mut self, out: &mut [u8]) -> Result<(), AnalyserError> {
        self.check_len(out.len(), self.config.fft_size)?;
        self.history.read_window(&mut self.frame)?;
        for (byte, &sample) in out.iter_mut().zip(self.frame.iter()) {
            *byte = sample_to_byte(sample);
        }
        Ok(())
    }

    /// Smoothed spectrum in decibels, one value per bin
    ///
    /// Advances the smoothing state. Non-finite decibel values are written as 0.
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` unless `out.len() == N/2`;
    /// no state is touched in that case
    pub fn get_float_frequency_data(&mut self, out: &mut [f32]) -> Result<(), AnalyserError> {
        self.check_len(out.len(), self.frequency_bin_count())?;
        self.analyse()?;

        for (db, &magnitude) in out.iter_mut().zip(self.smoothing.values()) {
            *db = to_decibels(magnitude);
        }
        Ok(())
    }

    /// Smoothed spectrum mapped from `[min_decibels, max_decibels]` to `[0, 255]`
    ///
    /// Advances the smoothing state exactly as
    /// [`get_float_frequency_data`](Self::get_float_frequency_data) does.
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` unless `out.len() == N/2`;
    /// no state is touched in that case
    pub fn get_byte_frequency_data(&mut self, out: &mut [u8]) -> Result<(), AnalyserError> {
        self.check_len(out.len(), self.frequency_bin_count())?;
        self.analyse()?;

        let (min_db, max_db) = (self.config.min_decibels, self.config.max_decibels);
        for (byte, &magnitude) in out.iter_mut().zip(self.smoothing.values()) {
            *byte = normalize_to_byte(to_decibels(magnitude), min_db, max_db);
        }
        Ok(())
    }

    /// Forget all history and smoothing, keeping the configuration
    pub fn reset(&mut self) {
        self.history.clear();
        self.smoothing.reset();
        log::debug!("Analyser state reset");
    }

    /// window → transform → smoothing over the current history
    fn analyse(&mut self) -> Result<(), AnalyserError> {
        self.history.read_window(&mut self.frame)?;
        self.window.apply(&mut self.frame)?;
        self.transform.transform(&self.frame, &mut self.magnitudes)?;
        self.smoothing.smooth(&self.magnitudes)?;

        log::trace!(
            "Analysed {}-point frame at cursor {}",
            self.config.fft_size,
            self.history.offset()
        );
        Ok(())
    }

    fn check_len(&self, actual: usize, expected: usize) -> Result<(), AnalyserError> {
        if actual != expected {
            return Err(AnalyserError::ShapeMismatch { expected, actual });
        }
        Ok(())
    }
}
