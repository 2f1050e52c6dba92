//! Lock-protected analyser handle for a producer thread and a consumer thread
//!
//! Every method takes the single engine lock for exactly one engine call.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::analysis::engine::AnalyserEngine;
use crate::config::AnalyserConfig;
use crate::error::AnalyserError;

/// Cloneable handle to one engine shared between threads
#[derive(Debug, Clone)]
pub struct SharedAnalyser {
    inner: Arc<Mutex<AnalyserEngine>>,
}

impl SharedAnalyser {
    /// Build an engine from `config` and wrap it
    pub fn new(config: AnalyserConfig) -> Result<Self, AnalyserError> {
        Ok(Self::from_engine(AnalyserEngine::new(config)?))
    }

    /// Wrap an existing engine
    pub fn from_engine(engine: AnalyserEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Number of frequency bins (N/2)
    pub fn frequency_bin_count(&self) -> usize {
        self.inner.lock().frequency_bin_count()
    }

    /// Transform size N
    pub fn fft_size(&self) -> usize {
        self.inner.lock().fft_size()
    }

    /// See [`AnalyserEngine::ingest`]
    pub fn ingest(&self, block: &[f32]) -> Result<(), AnalyserError> {
        self.inner.lock().ingest(block)
    }

    /// See [`AnalyserEngine::ingest_channels`]
    pub fn ingest_channels(&self, channels: &[&[f32]]) -> Result<(), AnalyserError> {
        self.inner.lock().ingest_channels(channels)
    }

    /// See [`AnalyserEngine::get_float_time_domain_data`]
    pub fn get_float_time_domain_data(&self, out: &mut [f32]) -> Result<(), AnalyserError> {
        self.inner.lock().get_float_time_domain_data(out)
    }

    /// See [`AnalyserEngine::get_byte_time_domain_data`]
    pub fn get_byte_time_domain_data(&self, out: &mut [u8]) -> Result<(), AnalyserError> {
        self.inner.lock().get_byte_time_domain_data(out)
    }

    /// See [`AnalyserEngine::get_float_frequency_data`]
    pub fn get_float_frequency_data(&self, out: &mut [f32]) -> Result<(), AnalyserError> {
        self.inner.lock().get_float_frequency_data(out)
    }

    /// See [`AnalyserEngine::get_byte_frequency_data`]
    pub fn get_byte_frequency_data(&self, out: &mut [u8]) -> Result<(), AnalyserError> {
        self.inner.lock().get_byte_frequency_data(out)
    }

    /// See [`AnalyserEngine::reconfigure`]
    pub fn reconfigure(&self, config: AnalyserConfig) -> Result<(), AnalyserError> {
        self.inner.lock().reconfigure(config)
    }

    /// See [`AnalyserEngine::reset`]
    pub fn reset(&self) {
        self.inner.lock().reset()
    }
}
