//! Analyser orchestration
//!
//! - `engine`: single-owner analyser driving the spectral pipeline
//! - `shared`: the same engine behind one lock for two-thread use

pub mod engine;
pub mod shared;
