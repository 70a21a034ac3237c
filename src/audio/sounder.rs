// src/audio/sounder.rs  —  Session: cached tones + synchronous send
use super::gate::CompletionGate;
use super::sequencer::{build_sequence, PlaybackSequence};
use super::tone::{generate_tone, ToneBuffer};
use super::{AudioError, AudioOutput, Format};
use crate::morse::{EncodedMessage, Timing};

/// Everything the tone cache depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSettings {
    pub sample_rate:    u32,
    pub frequency:      f64,
    pub wpm:            u32,
    /// 0 = off; ignored unless slower than `wpm`
    pub farnsworth_wpm: u32,
}

/// Owns the dit/dah tone buffers for one (frequency, WPM) pair and the output
/// device.  `send` takes `&mut self`, so one message is in flight at a time.
pub struct Sounder {
    timing: Timing,
    dit:    ToneBuffer,
    dash:   ToneBuffer,
    output: Box<dyn AudioOutput>,
    closed: bool,
}

impl Sounder {
    pub fn new(settings: ToneSettings, output: Box<dyn AudioOutput>) -> Result<Self, AudioError> {
        let timing = Timing::farnsworth(settings.wpm, settings.farnsworth_wpm);
        let dit  = generate_tone(settings.sample_rate, settings.frequency, timing.dot)?;
        let dash = generate_tone(settings.sample_rate, settings.frequency, timing.dash)?;
        log::info!(
            "[sounder] {} Hz @ {} WPM on {}: dit {:?} ({} frames), dah {:?} ({} frames)",
            dit.frequency(), timing.wpm, output.name(),
            dit.duration(), dit.len(), dash.duration(), dash.len(),
        );
        if let Some(eff) = timing.farnsworth {
            log::info!(
                "[sounder] farnsworth {} WPM: word gap {:?} instead of {:?}",
                eff, timing.word_gap, timing.base_word_gap(),
            );
        }
        Ok(Self { timing, dit, dash, output, closed: false })
    }

    pub fn timing(&self) -> &Timing { &self.timing }
    pub fn format(&self) -> Format { self.dit.format() }
    pub fn output_name(&self) -> &str { self.output.name() }

    pub fn sequence(&self, message: &EncodedMessage) -> Result<PlaybackSequence, AudioError> {
        build_sequence(message, &self.dit, &self.dash, &self.timing)
    }

    /// Play `message` and block until the device has delivered all of it
    pub fn send(&mut self, message: &EncodedMessage) -> Result<(), AudioError> {
        if self.closed {
            return Err(AudioError::Device("sounder is closed".into()));
        }
        let seq = self.sequence(message)?;
        if seq.segments().is_empty() {
            return Ok(());
        }
        log::debug!(
            "[sounder] {:?}: {} segments, {} tones, {:?}",
            message.raw_string(), seq.segments().len(), seq.tone_count(), seq.duration(),
        );
        let (signal, gate) = CompletionGate::new();
        self.output.submit(seq.into_playback(signal))?;
        gate.wait()
    }

    pub fn close(&mut self) -> Result<(), AudioError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.output.close()
    }
}

impl Drop for Sounder {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("[sounder] closing output: {e}");
        }
    }
}
