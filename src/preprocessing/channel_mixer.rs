//! Channel mixing utilities (multi-channel to mono conversion)
//!
//! The analyser always works on a single channel. Hosts delivering
//! interleaved or planar multi-channel quanta fold them down here first.

use serde::{Deserialize, Serialize};

use crate::error::AnalyserError;

/// Channel mixing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelMixMode {
    /// Arithmetic mean of all channels: (L + R) / 2 for stereo
    #[default]
    Average,
    /// Analyse channel 0 only, ignoring the rest
    FirstChannel,
    /// Keep the channel with the highest RMS over the block
    Dominant,
}

/// Fold planar channels into a single channel
///
/// # Arguments
///
/// * `channels` - One slice per channel, all of equal length
/// * `mode` - Mixing mode
///
/// # Returns
///
/// Mono samples, same length as each input channel
///
/// # Errors
///
/// Returns `AnalyserError::InvalidInput` if there are no channels or their lengths differ
pub fn downmix(channels: &[&[f32]], mode: ChannelMixMode) -> Result<Vec<f32>, AnalyserError> {
    let mut out = Vec::new();
    downmix_into(channels, mode, &mut out)?;
    Ok(out)
}

/// Fold planar channels into `out`, reusing its allocation
///
/// `out` is cleared and resized to the channel length.
pub fn downmix_into(
    channels: &[&[f32]],
    mode: ChannelMixMode,
    out: &mut Vec<f32>,
) -> Result<(), AnalyserError> {
    let first = channels
        .first()
        .ok_or_else(|| AnalyserError::InvalidInput("No channels to mix".to_string()))?;
    let len = first.len();

    if let Some(bad) = channels.iter().position(|c| c.len() != len) {
        return Err(AnalyserError::InvalidInput(format!(
            "Channel {} has {} samples, expected {}",
            bad,
            channels[bad].len(),
            len
        )));
    }

    out.clear();

    match mode {
        ChannelMixMode::FirstChannel => out.extend_from_slice(first),
        ChannelMixMode::Average => {
            out.extend_from_slice(first);
            for channel in &channels[1..] {
                for (acc, &x) in out.iter_mut().zip(channel.iter()) {
                    *acc += x;
                }
            }
            let scale = 1.0 / channels.len() as f32;
            for acc in out.iter_mut() {
                *acc *= scale;
            }
        }
        ChannelMixMode::Dominant => {
            // Sum of squares is enough to rank channels of equal length
            let loudest = channels
                .iter()
                .map(|c| c.iter().map(|&x| x * x).sum::<f32>())
                .enumerate()
                .fold((0, f32::MIN), |best, (i, energy)| {
                    if energy > best.1 {
                        (i, energy)
                    } else {
                        best
                    }
                })
                .0;
            out.extend_from_slice(channels[loudest]);
        }
    }

    log::trace!(
        "Mixed {} channels x {} samples using {:?}",
        channels.len(),
        len,
        mode
    );

    Ok(())
}
