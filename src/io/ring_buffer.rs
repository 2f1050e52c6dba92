//! Circular history of the most recent mono samples
//!
//! Holds the last `capacity` samples ever written. Writes split at the
//! wrap point into at most two contiguous copies; reads return the newest
//! `N` samples oldest-first. Positions never written read as zero.

use crate::error::AnalyserError;

/// Fixed-capacity circular sample store
#[derive(Debug, Clone)]
pub struct RingHistoryBuffer {
    /// Sample storage, zero-initialised
    data: Vec<f32>,
    /// Write cursor, always in [0, capacity)
    offset: usize,
}

impl RingHistoryBuffer {
    /// Create a zeroed buffer holding `capacity` samples
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::InvalidConfiguration` if `capacity` is not a non-zero power of two
    pub fn new(capacity: usize) -> Result<Self, AnalyserError> {
        if !capacity.is_power_of_two() {
            return Err(AnalyserError::InvalidConfiguration(format!(
                "history capacity must be a power of two, got {}",
                capacity
            )));
        }

        Ok(Self {
            data: vec![0.0; capacity],
            offset: 0,
        })
    }

    /// Capacity C in samples
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Current write cursor
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Append a block at the write cursor, wrapping at the end of storage
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::BlockTooLarge` if the block is longer than the capacity.
    /// The buffer is left untouched in that case.
    pub fn ingest(&mut self, block: &[f32]) -> Result<(), AnalyserError> {
        let capacity = self.data.len();
        if block.len() > capacity {
            return Err(AnalyserError::BlockTooLarge {
                block: block.len(),
                capacity,
            });
        }

        let first = block.len().min(capacity - self.offset);
        let (head, tail) = block.split_at(first);
        self.data[self.offset..self.offset + first].copy_from_slice(head);
        self.data[..tail.len()].copy_from_slice(tail);

        // capacity is a power of two
        self.offset = (self.offset + block.len()) & (capacity - 1);

        Ok(())
    }

    /// Fill `out` with the `out.len()` most recent samples, oldest first
    ///
    /// # Errors
    ///
    /// Returns `AnalyserError::ShapeMismatch` if `out` is longer than the capacity
    pub fn read_window(&self, out: &mut [f32]) -> Result<(), AnalyserError> {
        let capacity = self.data.len();
        let n = out.len();
        if n > capacity {
            return Err(AnalyserError::ShapeMismatch {
                expected: capacity,
                actual: n,
            });
        }

        let start = (self.offset + capacity - n) & (capacity - 1);
        let first = n.min(capacity - start);
        out[..first].copy_from_slice(&self.data[start..start + first]);
        out[first..].copy_from_slice(&self.data[..n - first]);

        Ok(())
    }

    /// Zero the history and rewind the cursor
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.offset = 0;
    }
}
