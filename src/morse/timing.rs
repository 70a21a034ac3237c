// src/morse/timing.rs  —  WPM → element durations (PARIS standard)
use std::time::Duration;

/// "PARIS" takes 50 dit units including its trailing word gap.
pub const PARIS_UNITS: u64 = 50;

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

// Element lengths in dit units.  Older generations of this timing used 4 for
// the letter gap; 3 is the ITU ratio.
pub const DIT_UNITS:        u32 = 1;
pub const DASH_UNITS:       u32 = 3;
pub const ELEM_GAP_UNITS:   u32 = 1;
pub const LETTER_GAP_UNITS: u32 = 3;
pub const WORD_GAP_UNITS:   u32 = 7;

/// One dit at `wpm`: 60 s / (50 × wpm), truncated to whole nanoseconds.
pub fn dit_unit(wpm: u32) -> Duration {
    let wpm = wpm.max(1) as u64;
    Duration::from_nanos(NANOS_PER_MINUTE / (PARIS_UNITS * wpm))
}

/// All timing derived from a single dot length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub wpm:        u32,
    /// Effective spacing speed, only set when slower than `wpm`
    pub farnsworth: Option<u32>,
    pub unit:       Duration,  // 1 unit at `wpm`
    pub dot:        Duration,  // 1 unit
    pub dash:       Duration,  // 3 units
    pub elem_gap:   Duration,  // 1 unit  (between dits/dahs in same char)
    pub char_gap:   Duration,  // 3 units (between characters)
    pub word_gap:   Duration,  // 7 units (between words, Farnsworth unit if set)
}

impl Timing {
    pub fn from_wpm(wpm: u32) -> Self {
        let wpm  = wpm.max(1);
        let unit = dit_unit(wpm);
        Self {
            wpm,
            farnsworth: None,
            unit,
            dot:      unit * DIT_UNITS,
            dash:     unit * DASH_UNITS,
            elem_gap: unit * ELEM_GAP_UNITS,
            char_gap: unit * LETTER_GAP_UNITS,
            word_gap: unit * WORD_GAP_UNITS,
        }
    }

    /// Farnsworth: characters and letter gaps at `char_wpm`, word gaps at
    /// `eff_wpm`.  Ignored unless `0 < eff_wpm < char_wpm`.
    pub fn farnsworth(char_wpm: u32, eff_wpm: u32) -> Self {
        let base = Self::from_wpm(char_wpm);
        if eff_wpm == 0 || eff_wpm >= base.wpm {
            return base;
        }
        Self {
            farnsworth: Some(eff_wpm),
            word_gap:   dit_unit(eff_wpm) * WORD_GAP_UNITS,
            ..base
        }
    }

    /// Word gap as it would be without Farnsworth spacing
    pub fn base_word_gap(&self) -> Duration {
        self.unit * WORD_GAP_UNITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dit_unit_matches_paris_formula() {
        for wpm in 1..=60u32 {
            let expected = 60.0 / (50.0 * wpm as f64);
            let got = dit_unit(wpm).as_secs_f64();
            assert!((got - expected).abs() < 1e-6, "wpm={wpm}: {got} vs {expected}");
        }
    }

    #[test]
    fn twenty_wpm_is_sixty_ms() {
        assert_eq!(dit_unit(20), Duration::from_millis(60));
        assert_eq!(dit_unit(10), Duration::from_millis(120));
    }

    #[test]
    fn derived_durations_are_unit_multiples() {
        let t = Timing::from_wpm(20);
        assert_eq!(t.dot, t.unit);
        assert_eq!(t.dash, t.unit * 3);
        assert_eq!(t.elem_gap, t.unit);
        assert_eq!(t.char_gap, t.unit * 3);
        assert_eq!(t.word_gap, t.unit * 7);
        assert_eq!(t.farnsworth, None);
    }

    #[test]
    fn farnsworth_only_slows_word_gap() {
        let t = Timing::farnsworth(20, 10);
        assert_eq!(t.farnsworth, Some(10));
        assert_eq!(t.word_gap, dit_unit(10) * 7);
        assert_eq!(t.char_gap, dit_unit(20) * 3);
        assert_eq!(t.elem_gap, dit_unit(20));
        assert_eq!(t.dash, dit_unit(20) * 3);
    }

    #[test]
    fn farnsworth_ignored_when_not_slower() {
        assert_eq!(Timing::farnsworth(20, 20), Timing::from_wpm(20));
        assert_eq!(Timing::farnsworth(20, 25), Timing::from_wpm(20));
        assert_eq!(Timing::farnsworth(20, 0), Timing::from_wpm(20));
    }

    #[test]
    fn zero_wpm_is_clamped() {
        assert_eq!(Timing::from_wpm(0).wpm, 1);
    }
}
