//! Blackman window table
//!
//! Coefficients are evaluated in double precision and stored as `f32`,
//! so a table built for a given size is bit-identical every time.
//!
//! # Example
//!
//! ```
//! use stratum_analyser::features::spectrum::window::WindowTable;
//!
//! let table = WindowTable::build(1024);
//! let mut frame = vec![1.0f32; 1024];
//! table.apply(&mut frame)?;
//! assert!(frame[512] > 0.99);
//! # Ok::<(), stratum_analyser::AnalyserError>(())
//! ```

use std::f64::consts::PI;

use crate::error::AnalyserError;

/// Blackman window coefficient for position `i` of an `n`-point window
///
/// `0.42 - 0.5·cos(2πi/(n-1)) + 0.08·cos(4πi/(n-1))`
pub fn blackman(i: usize, n: usize) -> f64 {
    if n < 2 {
        return 1.0;
    }
    let phase = PI * i as f64 / (n - 1) as f64;
    0.42 - 0.5 * (2.0 * phase).cos() + 0.08 * (4.0 * phase).cos()
}

/// Immutable per-position window coefficients for a fixed transform size
#[derive(Debug, Clone, PartialEq)]
pub struct WindowTable {
    coefficients: Box<[f32]>,
}

impl WindowTable {
    /// Precompute the Blackman table for an `n`-point transform
    pub fn build(n: usize) -> Self {
        let coefficients = (0..n).map(|i| blackman(i, n) as f32).collect();
        log::debug!("Built {}-point Blackman window table", n);
        Self { coefficients }
    }

    /// Transform size this table was built for
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True for a zero-length table
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Coefficients as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.coefficients
    }

    /// Multiply `frame` by the window in place
    ///
    /// Any product that is not finite is replaced with 0 so NaN or
    /// infinity never reaches the transform.
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` if `frame` is not exactly `len()` samples
    pub fn apply(&self, frame: &mut [f32]) -> Result<(), AnalyserError> {
        if frame.len() != self.coefficients.len() {
            return Err(AnalyserError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: frame.len(),
            });
        }

        for (sample, &w) in frame.iter_mut().zip(self.coefficients.iter()) {
            let windowed = *sample * w;
            *sample = if windowed.is_finite() { windowed } else { 0.0 };
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        let a = WindowTable::build(2048);
        let b = WindowTable::build(2048);
        let a_bits: Vec<u32> = a.as_slice().iter().map(|x| x.to_bits()).collect();
        let b_bits: Vec<u32> = b.as_slice().iter().map(|x| x.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn test_blackman_shape() {
        let n = 1024;
        let table = WindowTable::build(n);
        assert_eq!(table.len(), n);

        // Endpoints are ~0, symmetric, peak of 1.0 in the middle
        assert!(table.as_slice()[0].abs() < 1e-6);
        assert!(table.as_slice()[n - 1].abs() < 1e-6);
        for i in 0..n / 2 {
            assert!(
                (table.as_slice()[i] - table.as_slice()[n - 1 - i]).abs() < 1e-6,
                "window should be symmetric at {}",
                i
            );
        }
        assert!((blackman(511, 1023) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_coefficients() {
        // i = (n-1)/4 → cos(π/2) = 0, cos(π) = -1
        let value = blackman(8, 33);
        assert!((value - (0.42 - 0.08)).abs() < 1e-12);
    }

    #[test]
    fn test_apply_zeroes_non_finite_products() {
        let table = WindowTable::build(32);
        let mut frame = vec![1.0f32; 32];
        frame[10] = f32::NAN;
        frame[11] = f32::INFINITY;
        frame[12] = f32::NEG_INFINITY;
        table.apply(&mut frame).unwrap();

        assert!(frame.iter().all(|x| x.is_finite()));
        assert_eq!(frame[10], 0.0);
        assert_eq!(frame[11], 0.0);
        assert_eq!(frame[12], 0.0);
        assert_eq!(frame[13], table.as_slice()[13]);
    }

    #[test]
    fn test_apply_shape_mismatch() {
        let table = WindowTable::build(64);
        let mut frame = vec![0.0f32; 32];
        assert_eq!(
            table.apply(&mut frame),
            Err(AnalyserError::ShapeMismatch {
                expected: 64,
                actual: 32
            })
        );
    }
}
