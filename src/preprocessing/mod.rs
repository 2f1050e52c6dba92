//! Input preprocessing modules
//!
//! This module contains utilities for preparing audio before it reaches the history buffer:
//! - Channel mixing (multi-channel to mono)

pub mod channel_mixer;
