// src/audio/tone.rs  —  Precomputed sine tone with a decaying tail
use super::{AudioError, Format, Frame};
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;

/// Share of the tone (by sample count, rounded down) that fades out
pub const DECAY_PERCENT: usize = 5;
/// Per-sample amplitude factor inside the fade
pub const DECAY_FACTOR: f64 = 0.90;

/// One continuous tone, rendered once and shared read-only.
///
/// Cloning is cheap: clones share the same backing samples.
#[derive(Debug, Clone)]
pub struct ToneBuffer {
    samples:   Arc<[Frame]>,
    format:    Format,
    frequency: f64,
}

impl ToneBuffer {
    pub fn frames(&self) -> &[Frame] { &self.samples }
    pub fn shared(&self) -> Arc<[Frame]> { Arc::clone(&self.samples) }
    pub fn len(&self) -> usize { self.frames().len() }
    pub fn format(&self) -> Format { self.format }
    pub fn frequency(&self) -> f64 { self.frequency }
    pub fn duration(&self) -> Duration { self.format.duration(self.len()) }
}

/// Render `duration` of a `frequency` Hz sine at `sample_rate`.
///
/// The phase accumulates in `f64` and wraps to `[0, 1)` every sample.  The
/// last [`DECAY_PERCENT`] of samples are scaled by `DECAY_FACTOR^k`.
pub fn generate_tone(sample_rate: u32, frequency: f64, duration: Duration) -> Result<ToneBuffer, AudioError> {
    let dt = frequency / sample_rate as f64;
    if !(dt > 0.0 && dt < 0.5) {
        return Err(AudioError::InvalidFrequency { frequency, sample_rate });
    }

    let format = Format::stereo(sample_rate);
    let len = format.frames(duration);
    let decay_len = len * DECAY_PERCENT / 100;
    let decay_start = len - decay_len;

    let mut samples = Vec::with_capacity(len);
    let mut t = 0.0f64;
    let mut gain = 1.0f64;
    for i in 0..len {
        let mut v = (t * 2.0 * PI).sin();
        if i >= decay_start {
            v *= gain;
            gain *= DECAY_FACTOR;
        }
        let s = v as f32;
        samples.push([s, s]);
        t = (t + dt).fract();
    }

    Ok(ToneBuffer { samples: samples.into(), format, frequency })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 48_000;

    #[test]
    fn sample_count_is_rounded_duration() {
        let t = generate_tone(SR, 700.0, Duration::from_millis(60)).unwrap();
        assert_eq!(t.len(), 2880);
        assert_eq!(t.duration(), Duration::from_millis(60));
        // 1/7 s at 48 kHz = 6857.14 → 6857
        let t = generate_tone(SR, 700.0, Duration::from_nanos(142_857_142)).unwrap();
        assert_eq!(t.len(), 6857);
        // 0.5 sample rounds up
        let t = generate_tone(1000, 100.0, Duration::from_micros(2500)).unwrap();
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn channels_are_identical() {
        let t = generate_tone(SR, 660.0, Duration::from_millis(180)).unwrap();
        assert!(t.frames().iter().all(|f| f[0] == f[1]));
        assert_eq!(t.format().channels, 2);
    }

    #[test]
    fn rejects_frequency_at_or_above_nyquist() {
        let err = generate_tone(SR, 24_000.0, Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, AudioError::InvalidFrequency { .. }));
        assert!(generate_tone(SR, 30_000.0, Duration::from_millis(10)).is_err());
        assert!(generate_tone(SR, 0.0, Duration::from_millis(10)).is_err());
        assert!(generate_tone(SR, 23_999.0, Duration::from_millis(10)).is_ok());
    }

    #[test]
    fn tail_decays_geometrically() {
        let dur = Duration::from_millis(100);
        let t = generate_tone(SR, 700.0, dur).unwrap();
        let len = t.len();
        let decay_len = len * DECAY_PERCENT / 100;
        let start = len - decay_len;

        // Recompute the undamped sine with the same phase accumulation
        let dt = 700.0 / SR as f64;
        let mut phase = 0.0f64;
        for i in 0..len {
            let raw = (phase * 2.0 * PI).sin();
            let expected = if i >= start {
                raw * DECAY_FACTOR.powi((i - start) as i32)
            } else {
                raw
            };
            assert!((t.frames()[i][0] as f64 - expected).abs() < 1e-6, "sample {i}");
            phase = (phase + dt).fract();
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_tone(SR, 660.0, Duration::from_millis(60)).unwrap();
        let b = generate_tone(SR, 660.0, Duration::from_millis(60)).unwrap();
        assert_eq!(a.frames(), b.frames());
    }

    #[test]
    fn starts_at_zero_phase() {
        let t = generate_tone(SR, 700.0, Duration::from_millis(10)).unwrap();
        assert_eq!(t.frames()[0], [0.0, 0.0]);
    }
}
