//! Host-side pacing for feeding and polling an analyser
//!
//! The engine never schedules itself. A host pushes audio in fixed quanta
//! with [`QuantumFeeder`] and decides when to read spectra with
//! [`FrameTicker`], driven either by wall-clock time or by audio time.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use stratum_analyser::scheduler::{quantum_duration, FrameTicker, QuantumFeeder};
//! use stratum_analyser::{AnalyserConfig, AnalyserEngine};
//!
//! let config = AnalyserConfig::default();
//! let mut engine = AnalyserEngine::new(config.clone())?;
//! let source = vec![0.0f32; 44100];
//! let mut feeder = QuantumFeeder::new(&source, config.block_size)?;
//! let mut ticker = FrameTicker::new(60.0)?;
//! let step = quantum_duration(config.block_size, config.sample_rate)?;
//!
//! let mut bytes = vec![0u8; engine.frequency_bin_count()];
//! while feeder.feed(&mut engine, 1)? > 0 {
//!     for _ in 0..ticker.advance(step) {
//!         engine.get_byte_frequency_data(&mut bytes)?;
//!     }
//! }
//! # Ok::<(), stratum_analyser::AnalyserError>(())
//! ```

use std::time::{Duration, Instant};

use crate::analysis::engine::AnalyserEngine;
use crate::error::AnalyserError;

/// Wall-clock length of one quantum
///
/// # Errors
///
/// Returns `AnalyserError::InvalidConfiguration` if `sample_rate` is 0
pub fn quantum_duration(block_size: usize, sample_rate: u32) -> Result<Duration, AnalyserError> {
    if sample_rate == 0 {
        return Err(AnalyserError::InvalidConfiguration(
            "sample_rate must be > 0".to_string(),
        ));
    }

    Duration::try_from_secs_f64(block_size as f64 / sample_rate as f64).map_err(|e| {
        AnalyserError::InvalidConfiguration(format!(
            "quantum of {} samples at {} Hz is not a valid duration: {}",
            block_size, sample_rate, e
        ))
    })
}

/// Slices a decoded mono source into fixed quanta
///
/// The final quantum is zero-padded to full length.
#[derive(Debug)]
pub struct QuantumFeeder<'a> {
    source: &'a [f32],
    position: usize,
    block: Vec<f32>,
}

impl<'a> QuantumFeeder<'a> {
    /// Feed `source` in quanta of `block_size` samples
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidInput` if `block_size` is 0
    pub fn new(source: &'a [f32], block_size: usize) -> Result<Self, AnalyserError> {
        if block_size == 0 {
            return Err(AnalyserError::InvalidInput(
                "Block size must be > 0".to_string(),
            ));
        }

        Ok(Self {
            source,
            position: 0,
            block: vec![0.0; block_size],
        })
    }

    /// Samples of the source consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Quanta left, counting a partial tail as one
    pub fn remaining(&self) -> usize {
        let left = self.source.len() - self.position;
        left.div_ceil(self.block.len())
    }

    /// True once every sample has been handed out
    pub fn is_finished(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Next quantum, or `None` at end of source
    pub fn next_quantum(&mut self) -> Option<&[f32]> {
        if self.is_finished() {
            return None;
        }

        let end = (self.position + self.block.len()).min(self.source.len());
        let chunk = &self.source[self.position..end];
        self.block[..chunk.len()].copy_from_slice(chunk);
        self.block[chunk.len()..].fill(0.0);
        self.position = end;

        Some(&self.block)
    }

    /// Ingest up to `count` quanta into `engine`
    ///
    /// Returns how many quanta were ingested; 0 means the source is exhausted.
    pub fn feed(
        &mut self,
        engine: &mut AnalyserEngine,
        count: usize,
    ) -> Result<usize, AnalyserError> {
        let mut fed = 0;
        while fed < count {
            match self.next_quantum() {
                Some(block) => engine.ingest(block)?,
                None => break,
            }
            fed += 1;
        }
        Ok(fed)
    }
}

/// Converts elapsed time into a count of due render frames
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    pending: Duration,
    last: Option<Instant>,
}

impl FrameTicker {
    /// Ticker firing `frames_per_second` times per second of elapsed time
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidConfiguration` unless the rate is finite, positive,
    /// and gives a frame interval between 1 ns and `Duration::MAX`
    pub fn new(frames_per_second: f64) -> Result<Self, AnalyserError> {
        if !frames_per_second.is_finite() || frames_per_second <= 0.0 {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "frame rate must be finite and > 0, got {}",
                frames_per_second
            )));
        }

        let interval = Duration::try_from_secs_f64(1.0 / frames_per_second)
            .ok()
            .filter(|interval| !interval.is_zero())
            .ok_or_else(|| {
                AnalyserError::InvalidConfiguration(format!(
                    "frame rate {} gives an unrepresentable frame interval",
                    frames_per_second
                ))
            })?;

        Ok(Self {
            interval,
            pending: Duration::ZERO,
            last: None,
        })
    }

    /// Time between frames
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Account for `elapsed` time and return the number of frames now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        // interval is non-zero, checked in new()
        let due = self.pending.as_nanos() / self.interval.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.pending = self.pending.saturating_sub(self.interval.saturating_mul(due));
        due
    }

    /// Wall-clock variant of [`advance`](Self::advance)
    ///
    /// The first poll always yields one frame so a host can draw immediately.
    pub fn poll(&mut self, now: Instant) -> u32 {
        match self.last.replace(now) {
            None => 1,
            Some(previous) => self.advance(now.saturating_duration_since(previous)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyserConfig;

    #[test]
    fn test_feeder_pads_last_quantum() {
        let source: Vec<f32> = (1..=10).map(|i| i as f32).collect();
        let mut feeder = QuantumFeeder::new(&source, 4).unwrap();
        assert_eq!(feeder.remaining(), 3);

        assert_eq!(feeder.next_quantum().unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(feeder.next_quantum().unwrap(), &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(feeder.next_quantum().unwrap(), &[9.0, 10.0, 0.0, 0.0]);
        assert!(feeder.next_quantum().is_none());
        assert!(feeder.is_finished());
        assert_eq!(feeder.position(), 10);
    }

    #[test]
    fn test_feeder_rejects_zero_block() {
        assert!(QuantumFeeder::new(&[0.0; 8], 0).is_err());
    }

    #[test]
    fn test_feed_into_engine() {
        let config = AnalyserConfig {
            fft_size: 32,
            history_capacity: 256,
            block_size: 16,
            ..Default::default()
        };
        let mut engine = AnalyserEngine::new(config).unwrap();
        let source: Vec<f32> = (0..40).map(|i| i as f32).collect();
        let mut feeder = QuantumFeeder::new(&source, 16).unwrap();

        assert_eq!(feeder.feed(&mut engine, 2).unwrap(), 2);
        assert_eq!(feeder.feed(&mut engine, 5).unwrap(), 1);
        assert_eq!(feeder.feed(&mut engine, 5).unwrap(), 0);

        let mut out = vec![0.0; 32];
        engine.get_float_time_domain_data(&mut out).unwrap();
        let expected: Vec<f32> = (24..40)
            .map(|i| i as f32)
            .chain(std::iter::repeat(0.0).take(8))
            .collect();
        assert_eq!(&out[8..], expected.as_slice());
    }

    #[test]
    fn test_ticker_counts_frames() {
        let mut ticker = FrameTicker::new(100.0).unwrap();
        assert_eq!(ticker.advance(Duration::from_millis(5)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(5)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(35)), 3);
        // 5 ms carried over
        assert_eq!(ticker.advance(Duration::from_millis(5)), 1);
    }

    #[test]
    fn test_ticker_audio_time_rate() {
        // 128-sample quanta at 44.1 kHz polled at 60 fps
        let mut ticker = FrameTicker::new(60.0).unwrap();
        let step = quantum_duration(128, 44100).unwrap();
        let frames: u32 = (0..44100 / 128).map(|_| ticker.advance(step)).sum();
        assert!((59..=60).contains(&frames), "got {} frames in ~1s", frames);
    }

    #[test]
    fn test_ticker_poll() {
        let mut ticker = FrameTicker::new(10.0).unwrap();
        let start = Instant::now();
        assert_eq!(ticker.poll(start), 1);
        assert_eq!(ticker.poll(start + Duration::from_millis(50)), 0);
        assert_eq!(ticker.poll(start + Duration::from_millis(250)), 2);
    }

    #[test]
    fn test_ticker_rejects_bad_rate() {
        assert!(FrameTicker::new(0.0).is_err());
        assert!(FrameTicker::new(f64::NAN).is_err());
        assert!(FrameTicker::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ticker_rejects_unrepresentable_interval() {
        // Interval too long for Duration
        assert!(matches!(
            FrameTicker::new(1e-30),
            Err(AnalyserError::InvalidConfiguration(_))
        ));
        // Interval rounds to 0 ns
        assert!(matches!(
            FrameTicker::new(5e9),
            Err(AnalyserError::InvalidConfiguration(_))
        ));

        // Fastest accepted rate still advances without dividing by zero
        let mut ticker = FrameTicker::new(1e9).unwrap();
        assert_eq!(ticker.interval(), Duration::from_nanos(1));
        assert_eq!(ticker.advance(Duration::from_micros(1)), 1000);
    }

    #[test]
    fn test_quantum_duration_bounds() {
        assert!(matches!(
            quantum_duration(128, 0),
            Err(AnalyserError::InvalidConfiguration(_))
        ));
        assert_eq!(quantum_duration(0, 44100).unwrap(), Duration::ZERO);
        assert_eq!(quantum_duration(48, 48000).unwrap(), Duration::from_millis(1));
    }
}
