// src/audio/mod.rs  —  AudioOutput trait, sample format, backends
pub mod error;
pub mod gate;
pub mod sequencer;
pub mod sounder;
pub mod stream;
pub mod tone;
mod wav_backend;

pub use error::AudioError;
pub use sequencer::Playback;
pub use sounder::{Sounder, ToneSettings};
pub use wav_backend::WavAudio;

use crate::config::OutputKind;
use std::path::Path;
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One stereo sample pair (left, right)
pub type Frame = [f32; 2];

pub const SILENT: Frame = [0.0, 0.0];

/// Sample rate and layout shared by tone buffers and output devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub sample_rate: u32,
    pub channels:    u16,
    /// Bytes per sample
    pub precision:   u16,
}

impl Format {
    pub fn stereo(sample_rate: u32) -> Self {
        Self { sample_rate, channels: 2, precision: 4 }
    }

    /// Frames covering `d`, rounded to the nearest frame
    pub fn frames(&self, d: Duration) -> usize {
        let num = self.sample_rate as u128 * d.as_nanos() + 500_000_000;
        (num / 1_000_000_000) as usize
    }

    pub fn duration(&self, frames: usize) -> Duration {
        let nanos = frames as u128 * 1_000_000_000 / self.sample_rate.max(1) as u128;
        Duration::from_nanos(nanos as u64)
    }

    /// Device buffer: a tenth of a second
    pub fn buffer_frames(&self) -> usize {
        (self.sample_rate / 10).max(1) as usize
    }
}

/// A sink that plays submitted streams on its own delivery thread/callback
pub trait AudioOutput: Send {
    /// Hand a playback to the device and return immediately.  The device
    /// fires the playback's completion marker after its last frame.
    fn submit(&mut self, playback: Playback) -> Result<(), AudioError>;
    /// Stop the device; further submissions fail
    fn close(&mut self) -> Result<(), AudioError>;
    fn name(&self) -> &str;
}

// ── cpal backend ─────────────────────────────────────────────────────────────
#[cfg(feature = "audio-cpal")]
mod cpal_backend;
#[cfg(feature = "audio-cpal")]
pub use cpal_backend::CpalAudio;

/// Null backend (no sound).  Drains playbacks on a worker thread one buffer
/// at a time; `paced` sleeps per buffer so timing feels real.
pub struct NullAudio {
    tx:     Option<Sender<Playback>>,
    worker: Option<JoinHandle<()>>,
}

impl NullAudio {
    pub fn new(format: Format, paced: bool) -> Self {
        let (tx, rx) = channel::<Playback>();
        let worker = thread::spawn(move || {
            let mut buf = vec![SILENT; format.buffer_frames()];
            while let Ok(mut playback) = rx.recv() {
                loop {
                    let (n, more) = playback.read(&mut buf);
                    if !more { break; }
                    if paced { thread::sleep(format.duration(n)); }
                }
            }
        });
        Self { tx: Some(tx), worker: Some(worker) }
    }
}

impl AudioOutput for NullAudio {
    fn submit(&mut self, playback: Playback) -> Result<(), AudioError> {
        let tx = self.tx.as_ref()
            .ok_or_else(|| AudioError::Device("null output is closed".into()))?;
        tx.send(playback)
            .map_err(|_| AudioError::Device("null output worker stopped".into()))
    }

    fn close(&mut self) -> Result<(), AudioError> {
        self.tx = None;
        if let Some(h) = self.worker.take() {
            h.join().map_err(|_| AudioError::Device("null output worker panicked".into()))?;
        }
        Ok(())
    }

    fn name(&self) -> &str { "null" }
}

/// Factory for the configured backend.  `Auto` falls back to a paced
/// `NullAudio` when no device can be opened; an explicit `Cpal` fails instead.
pub fn create_audio(
    kind:     OutputKind,
    format:   Format,
    volume:   f32,
    wav_path: &Path,
) -> Result<Box<dyn AudioOutput>, AudioError> {
    match kind {
        OutputKind::Null => Ok(Box::new(NullAudio::new(format, true))),
        OutputKind::Wav  => Ok(Box::new(WavAudio::create(wav_path, format, volume)?)),
        OutputKind::Cpal => {
            #[cfg(feature = "audio-cpal")]
            { Ok(Box::new(CpalAudio::new(format, volume)?)) }
            #[cfg(not(feature = "audio-cpal"))]
            { Err(AudioError::Device("built without the audio-cpal feature".into())) }
        }
        OutputKind::Auto => {
            #[cfg(feature = "audio-cpal")]
            {
                match CpalAudio::new(format, volume) {
                    Ok(a)  => return Ok(Box::new(a)),
                    Err(e) => log::warn!("cpal init failed: {e}  →  using NullAudio"),
                }
            }
            Ok(Box::new(NullAudio::new(format, true)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::gate::CompletionGate;
    use crate::audio::sequencer::build_sequence;
    use crate::audio::tone::generate_tone;
    use crate::morse::{encode, Timing};

    #[test]
    fn frames_round_to_nearest() {
        let f = Format::stereo(48_000);
        assert_eq!(f.frames(Duration::from_millis(60)), 2880);
        assert_eq!(f.frames(Duration::ZERO), 0);
        let f = Format::stereo(1000);
        assert_eq!(f.frames(Duration::from_micros(1499)), 1);
        assert_eq!(f.frames(Duration::from_micros(1500)), 2);
    }

    #[test]
    fn duration_inverts_frames() {
        let f = Format::stereo(48_000);
        assert_eq!(f.duration(48_000), Duration::from_secs(1));
        assert_eq!(f.duration(2880), Duration::from_millis(60));
    }

    #[test]
    fn null_audio_signals_completion() {
        let t = Timing::from_wpm(30);
        let dit = generate_tone(48_000, 700.0, t.dot).unwrap();
        let dash = generate_tone(48_000, 700.0, t.dash).unwrap();
        let seq = build_sequence(&encode("ab"), &dit, &dash, &t).unwrap();

        let mut out = NullAudio::new(Format::stereo(48_000), false);
        let (signal, gate) = CompletionGate::new();
        out.submit(seq.into_playback(signal)).unwrap();
        assert!(gate.wait().is_ok());
        out.close().unwrap();
    }

    #[test]
    fn closed_null_audio_rejects_submit() {
        let t = Timing::from_wpm(30);
        let dit = generate_tone(48_000, 700.0, t.dot).unwrap();
        let seq = build_sequence(&encode("e"), &dit, &dit, &t).unwrap();
        let mut out = NullAudio::new(Format::stereo(48_000), false);
        out.close().unwrap();
        let (signal, _gate) = CompletionGate::new();
        assert!(matches!(out.submit(seq.into_playback(signal)), Err(AudioError::Device(_))));
    }
}
