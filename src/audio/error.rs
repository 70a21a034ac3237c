// src/audio/error.rs  —  Errors raised by tone synthesis, streams and devices
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    /// Tone frequency at or above Nyquist for the sample rate
    #[error("tone frequency {frequency} Hz must be below half the sample rate ({sample_rate} Hz)")]
    InvalidFrequency { frequency: f64, sample_rate: u32 },

    #[error("cannot seek to sample {pos}: stream has {len} samples")]
    OutOfRangeSeek { pos: usize, len: usize },

    /// A symbol other than dot or dash reached the sequencer
    #[error("invalid Morse symbol {0:?} in encoded message")]
    InvalidToken(char),

    #[error("audio device error: {0}")]
    Device(String),
}

impl AudioError {
    pub fn device(e: impl std::fmt::Display) -> Self {
        Self::Device(e.to_string())
    }
}
