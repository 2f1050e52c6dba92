//! Forward FFT from a real windowed frame to per-bin magnitudes
//!
//! The plan and working buffers are allocated once per transform size;
//! each call is a pure function of its input frame.
//!
//! Bin `k` covers frequency `k * sample_rate / N`. Magnitudes are scaled
//! by `2/N`, so a full-scale sinusoid centred on a bin reads as its
//! amplitude before windowing loss.

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::AnalyserError;

/// Planned forward transform of a fixed power-of-two size
#[derive(Clone)]
pub struct SpectrumTransform {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    size: usize,
}

impl fmt::Debug for SpectrumTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumTransform")
            .field("size", &self.size)
            .finish()
    }
}

impl SpectrumTransform {
    /// Plan a forward transform of `size` points
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidConfiguration` unless `size` is a power of two >= 2
    pub fn new(size: usize) -> Result<Self, AnalyserError> {
        if size < 2 || !size.is_power_of_two() {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "transform size must be a power of two >= 2, got {}",
                size
            )));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        log::debug!("Planned {}-point forward FFT", size);

        Ok(Self {
            fft,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
            size,
        })
    }

    /// Transform size N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of output bins (N/2)
    pub fn bin_count(&self) -> usize {
        self.size / 2
    }

    /// Compute `N/2` magnitudes of `frame` into `magnitudes`
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` if `frame` is not N samples or
    /// `magnitudes` is not N/2 slots
    pub fn transform(
        &mut self,
        frame: &[f32],
        magnitudes: &mut [f32],
    ) -> Result<(), AnalyserError> {
        self.check_output(magnitudes.len())?;
        self.run(frame)?;

        let scale = 2.0 / self.size as f32;
        for (out, bin) in magnitudes.iter_mut().zip(self.buffer.iter()) {
            *out = bin.norm() * scale;
        }

        Ok(())
    }

    /// Compute magnitudes and phases (radians) of `frame`
    ///
    /// The analyser pipeline only consumes magnitudes; phases are exposed
    /// for hosts that need them.
    pub fn transform_polar(
        &mut self,
        frame: &[f32],
        magnitudes: &mut [f32],
        phases: &mut [f32],
    ) -> Result<(), AnalyserError> {
        self.check_output(magnitudes.len())?;
        self.check_output(phases.len())?;
        self.run(frame)?;

        let scale = 2.0 / self.size as f32;
        for ((mag, phase), bin) in magnitudes
            .iter_mut()
            .zip(phases.iter_mut())
            .zip(self.buffer.iter())
        {
            *mag = bin.norm() * scale;
            *phase = bin.arg();
        }

        Ok(())
    }

    fn check_output(&self, len: usize) -> Result<(), AnalyserError> {
        if len != self.bin_count() {
            return Err(AnalyserError::ShapeMismatch {
                expected: self.bin_count(),
                actual: len,
            });
        }
        Ok(())
    }

    fn run(&mut self, frame: &[f32]) -> Result<(), AnalyserError> {
        if frame.len() != self.size {
            return Err(AnalyserError::ShapeMismatch {
                expected: self.size,
                actual: frame.len(),
            });
        }

        for (slot, &x) in self.buffer.iter_mut().zip(frame.iter()) {
            *slot = Complex::new(x, 0.0);
        }
        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        Ok(())
    }
}
