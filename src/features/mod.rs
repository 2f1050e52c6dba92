//! Feature extraction modules
//!
//! This module contains the spectral pipeline stages:
//! - Blackman window table
//! - Forward FFT to magnitudes
//! - Exponential smoothing across analyses
//! - Decibel conversion and range normalisation

pub mod spectrum;
