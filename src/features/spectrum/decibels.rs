//! Decibel conversion and output range normalisation
//!
//! Non-finite results are mapped to 0 explicitly. Note the consequence for
//! silence: a zero magnitude gives `-inf` dB, which is reported as 0 dB and
//! therefore saturates to byte 255 when `max_decibels < 0`. Hosts that want
//! silence drawn as empty bars must detect it before normalising.

/// Convert a linear magnitude to decibels: `20·log10(magnitude)`
///
/// Returns 0 when the result is not finite (magnitude <= 0 or NaN).
pub fn to_decibels(magnitude: f32) -> f32 {
    let db = 20.0 * magnitude.log10();
    if db.is_finite() {
        db
    } else {
        0.0
    }
}

/// Convert decibels back to a linear magnitude: `10^(db/20)`
pub fn db_to_magnitude(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}

/// Position of `value` inside `[min, max]` as a fraction, clamped to [0, 1]
pub fn value_to_percent(value: f32, min: f32, max: f32) -> f32 {
    let pct = (value - min) / (max - min);
    if pct.is_finite() {
        pct.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Map `db` linearly from `[min_db, max_db]` onto `[0, 255]`
///
/// Rounded to nearest, then clamped; never wraps.
pub fn normalize_to_byte(db: f32, min_db: f32, max_db: f32) -> u8 {
    let scaled = ((db - min_db) / (max_db - min_db) * 255.0).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Map a time-domain sample in [-1, 1] onto a byte centred at 128
pub fn sample_to_byte(sample: f32) -> u8 {
    let scaled = (128.0 * (1.0 + sample)).floor();
    if scaled.is_nan() {
        return 128;
    }
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decibels() {
        assert!((to_decibels(1.0) - 0.0).abs() < 1e-6);
        assert!((to_decibels(0.1) + 20.0).abs() < 1e-4);
        assert!((to_decibels(0.001) + 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_to_decibels_non_finite_maps_to_zero() {
        assert_eq!(to_decibels(0.0), 0.0);
        assert_eq!(to_decibels(-1.0), 0.0);
        assert_eq!(to_decibels(f32::NAN), 0.0);
        assert_eq!(to_decibels(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_db_to_magnitude_inverts() {
        for db in [-100.0, -60.0, -12.0, 0.0] {
            let back = to_decibels(db_to_magnitude(db));
            assert!((back - db).abs() < 1e-3, "{} came back as {}", db, back);
        }
    }

    #[test]
    fn test_normalize_boundaries() {
        assert_eq!(normalize_to_byte(-100.0, -100.0, -12.0), 0);
        assert_eq!(normalize_to_byte(-12.0, -100.0, -12.0), 255);
        assert_eq!(normalize_to_byte(-56.0, -100.0, -12.0), 128);
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize_to_byte(-500.0, -100.0, -12.0), 0);
        assert_eq!(normalize_to_byte(0.0, -100.0, -12.0), 255);
        assert_eq!(normalize_to_byte(1e30, -100.0, -12.0), 255);
        assert_eq!(normalize_to_byte(f32::NEG_INFINITY, -100.0, -12.0), 0);
        assert_eq!(normalize_to_byte(f32::NAN, -100.0, -12.0), 0);
    }

    #[test]
    fn test_value_to_percent() {
        assert_eq!(value_to_percent(5.0, 0.0, 10.0), 0.5);
        assert_eq!(value_to_percent(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(value_to_percent(50.0, 0.0, 10.0), 1.0);
        assert_eq!(value_to_percent(1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_sample_to_byte() {
        assert_eq!(sample_to_byte(0.0), 128);
        assert_eq!(sample_to_byte(-1.0), 0);
        assert_eq!(sample_to_byte(1.0), 255);
        assert_eq!(sample_to_byte(-2.0), 0);
        assert_eq!(sample_to_byte(0.5), 192);
    }
}
