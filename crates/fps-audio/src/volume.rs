//! Linear ↔ decibel volume conversion for the mixer.
//!
//! Settings and UI work with a linear volume in `[0, 1]`; the mixer's
//! exposed parameters are in decibels.

/// Linear volume substituted for zero or negative input before taking the log.
///
/// This makes the conversion lossy at the bottom end: anything `<= 0` comes
/// back from [`from_decibels`] as `0.001` (-60 dB) rather than silence.
pub const MIN_LINEAR_VOLUME: f32 = 0.001;

/// Convert a linear volume to decibels (`20 * log10(value)`).
pub fn to_decibels(value: f32) -> f32 {
    // `!(value > 0.0)` also catches NaN
    let value = if !(value > 0.0) { MIN_LINEAR_VOLUME } else { value };
    20.0 * value.log10()
}

/// Convert decibels back to a linear volume (`10^(db / 20)`).
///
/// Not clamped: +20 dB gives 10.0. Callers that need `[0, 1]` clamp themselves.
pub fn from_decibels(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn unity_gain_is_zero_db() {
        assert!(to_decibels(1.0).abs() < TOLERANCE);
        assert!((from_decibels(0.0) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn twenty_db_is_a_factor_of_ten() {
        assert!((from_decibels(-20.0) - 0.1).abs() < TOLERANCE);
        assert!((from_decibels(20.0) - 10.0).abs() < 1e-4);
        assert!((to_decibels(0.1) + 20.0).abs() < 1e-4);
    }

    #[test]
    fn non_positive_input_uses_floor() {
        let floor = to_decibels(MIN_LINEAR_VOLUME);
        assert!((floor + 60.0).abs() < 1e-3);
        assert_eq!(to_decibels(0.0), floor);
        assert_eq!(to_decibels(-0.5), floor);
        assert_eq!(to_decibels(f32::NEG_INFINITY), floor);
        assert_eq!(to_decibels(f32::NAN), floor);
    }

    #[test]
    fn round_trip_preserves_positive_volumes() {
        for v in [0.001, 0.01, 0.25, 0.5, 0.75, 0.9, 1.0] {
            let back = from_decibels(to_decibels(v));
            assert!((back - v).abs() < v * 1e-4, "{v} came back as {back}");
        }
    }

    #[test]
    fn round_trip_of_silence_is_the_floor() {
        let back = from_decibels(to_decibels(0.0));
        assert!((back - MIN_LINEAR_VOLUME).abs() < 1e-6);
    }
}
