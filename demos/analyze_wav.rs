//! Example: Run a WAV file through the analyser at playback pace
//!
//! Feeds the file in 128-sample quanta and reads a byte spectrum every
//! 1/60 s of audio time, printing a coarse bar summary per second.
//!
//! ```text
//! cargo run --example analyze_wav -- path/to/file.wav
//! ```

use stratum_analyser::features::spectrum::{db_to_magnitude, value_to_percent};
use stratum_analyser::scheduler::{quantum_duration, FrameTicker, QuantumFeeder};
use stratum_analyser::{AnalyserConfig, AnalyserEngine};

/// Bars printed per summary line
const BANDS: usize = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: analyze_wav <file.wav>")?;

    let mut reader = hound::WavReader::open(&path)?;
    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<_, _>>()?
        }
    };

    // Planar channels, folded by the engine's channel mix
    let channels = spec.channels as usize;
    let planar: Vec<Vec<f32>> = (0..channels)
        .map(|c| samples.iter().skip(c).step_by(channels).copied().collect())
        .collect();

    let config = AnalyserConfig {
        sample_rate: spec.sample_rate,
        ..Default::default()
    };
    let mut engine = AnalyserEngine::new(config.clone())?;
    let mut feeders = planar
        .iter()
        .map(|channel| QuantumFeeder::new(channel, config.block_size))
        .collect::<Result<Vec<_>, _>>()?;
    let mut ticker = FrameTicker::new(60.0)?;
    let step = quantum_duration(config.block_size, config.sample_rate)?;

    println!(
        "{}: {} Hz, {} channel(s), {:.2} s",
        path,
        spec.sample_rate,
        channels,
        planar.first().map_or(0, Vec::len) as f32 / spec.sample_rate as f32
    );

    let mut bytes = vec![0u8; engine.frequency_bin_count()];
    let mut frame = 0u64;
    loop {
        let quanta: Vec<&[f32]> = feeders.iter_mut().filter_map(|f| f.next_quantum()).collect();
        if quanta.len() != channels {
            break;
        }
        engine.ingest_channels(&quanta)?;

        for _ in 0..ticker.advance(step) {
            engine.get_byte_frequency_data(&mut bytes)?;
            frame += 1;
            if frame % 60 == 0 {
                println!(
                    "{:>6.1}s {}",
                    frame as f32 / 60.0,
                    render_bars(&bytes, config.min_decibels)
                );
            }
        }
    }

    Ok(())
}

/// Average the spectrum into `BANDS` groups and draw each as a glyph
///
/// Bar height is linear in magnitude: each byte is mapped back to a dB
/// value below 0 dB and placed between the floor and full-scale magnitudes.
fn render_bars(bytes: &[u8], min_decibels: f32) -> String {
    const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let floor = db_to_magnitude(min_decibels);
    let ceiling = db_to_magnitude(0.0);

    bytes
        .chunks(bytes.len().div_ceil(BANDS))
        .map(|band| {
            let mean = band.iter().map(|&b| b as f32).sum::<f32>() / band.len() as f32;
            let db = min_decibels * (1.0 - mean / 256.0);
            let height = value_to_percent(db_to_magnitude(db), floor, ceiling);
            GLYPHS[((height * GLYPHS.len() as f32) as usize).min(GLYPHS.len() - 1)]
        })
        .collect()
}
