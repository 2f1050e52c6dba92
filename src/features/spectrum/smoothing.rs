//! Exponential smoothing of spectral magnitude across analyses
//!
//! Each bin keeps `state = α·state + (1-α)·raw`. A small α follows the
//! newest frame closely; α = 1 freezes the state.

use crate::error::AnalyserError;

/// Per-bin moving average persisted between frequency requests
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingState {
    values: Vec<f32>,
    time_constant: f32,
}

impl SmoothingState {
    /// Zeroed state for `bins` bins with smoothing constant `time_constant`
    pub fn new(bins: usize, time_constant: f32) -> Self {
        Self {
            values: vec![0.0; bins],
            time_constant,
        }
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no bins
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smoothing constant α
    pub fn time_constant(&self) -> f32 {
        self.time_constant
    }

    /// Change α without discarding accumulated state
    pub fn set_time_constant(&mut self, time_constant: f32) {
        self.time_constant = time_constant;
    }

    /// Current smoothed magnitudes
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Blend `raw` into the state in place
    ///
    /// A blended value that is not finite resets that bin to 0 so one bad
    /// frame cannot poison every later analysis.
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` unless `raw` holds one magnitude
    /// per bin; the state is left untouched in that case
    pub fn smooth(&mut self, raw: &[f32]) -> Result<&[f32], AnalyserError> {
        if raw.len() != self.values.len() {
            return Err(AnalyserError::ShapeMismatch {
                expected: self.values.len(),
                actual: raw.len(),
            });
        }

        let alpha = self.time_constant;
        for (state, &x) in self.values.iter_mut().zip(raw.iter()) {
            let blended = alpha * *state + (1.0 - alpha) * x;
            *state = if blended.is_finite() { blended } else { 0.0 };
        }

        Ok(&self.values)
    }

    /// Zero every bin
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_weights_previous_by_alpha() {
        let mut state = SmoothingState::new(2, 0.8);
        state.smooth(&[1.0, 10.0]).unwrap();
        // 0.8·0 + 0.2·x
        assert!((state.values()[0] - 0.2).abs() < 1e-6);
        assert!((state.values()[1] - 2.0).abs() < 1e-6);

        state.smooth(&[1.0, 10.0]).unwrap();
        // 0.8·0.2 + 0.2·1
        assert!((state.values()[0] - 0.36).abs() < 1e-6);
    }

    #[test]
    fn test_zero_alpha_tracks_input() {
        let mut state = SmoothingState::new(3, 0.0);
        state.smooth(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(state.values(), &[0.1, 0.2, 0.3]);
        state.smooth(&[0.5, 0.5, 0.5]).unwrap();
        assert_eq!(state.values(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_unit_alpha_freezes_state() {
        let mut state = SmoothingState::new(2, 1.0);
        state.smooth(&[5.0, 5.0]).unwrap();
        assert_eq!(state.values(), &[0.0, 0.0]);
    }

    #[test]
    fn test_converges_monotonically() {
        let alpha = 0.5;
        let mut state = SmoothingState::new(1, alpha);
        let target = 0.75;
        let mut previous = 0.0;
        for step in 1..=30 {
            let current = state.smooth(&[target]).unwrap()[0];
            assert!(current >= previous, "step {} went backwards", step);
            let expected_gap = target * alpha.powi(step);
            assert!(((target - current) - expected_gap).abs() < 1e-6);
            previous = current;
        }
        assert!((previous - target).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_blend_resets_bin() {
        let mut state = SmoothingState::new(2, 0.5);
        state.smooth(&[f32::INFINITY, 1.0]).unwrap();
        assert_eq!(state.values()[0], 0.0);
        assert_eq!(state.values()[1], 0.5);
    }

    #[test]
    fn test_length_mismatch_leaves_state() {
        let mut state = SmoothingState::new(4, 0.5);
        state.smooth(&[1.0; 4]).unwrap();

        assert_eq!(
            state.smooth(&[1.0; 3]),
            Err(AnalyserError::ShapeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(state.smooth(&[1.0; 5]).is_err());
        assert_eq!(state.values(), &[0.5; 4]);
    }

    #[test]
    fn test_set_time_constant_keeps_state() {
        let mut state = SmoothingState::new(1, 0.0);
        state.smooth(&[2.0]).unwrap();
        state.set_time_constant(0.5);
        assert_eq!(state.values(), &[2.0]);
        state.smooth(&[0.0]).unwrap();
        assert_eq!(state.values(), &[1.0]);

        state.reset();
        assert_eq!(state.values(), &[0.0]);
    }
}
