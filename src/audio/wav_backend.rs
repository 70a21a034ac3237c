// src/audio/wav_backend.rs  —  Render playbacks into a WAV file
use super::{AudioError, AudioOutput, Format, Playback, SILENT};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes every submitted playback back to back as 32-bit float stereo.
/// Rendering happens inside `submit`, so the completion marker has already
/// fired when it returns.
pub struct WavAudio {
    writer: Option<WavWriter<BufWriter<File>>>,
    name:   String,
    format: Format,
    volume: f32,
}

impl WavAudio {
    pub fn create(path: &Path, format: Format, volume: f32) -> Result<Self, AudioError> {
        let spec = WavSpec {
            channels:        format.channels,
            sample_rate:     format.sample_rate,
            bits_per_sample: format.precision * 8,
            sample_format:   SampleFormat::Float,
        };
        let writer = WavWriter::create(path, spec)
            .map_err(|e| AudioError::Device(format!("creating {}: {e}", path.display())))?;
        log::info!("[audio] writing WAV to {}", path.display());
        Ok(Self {
            writer: Some(writer),
            name:   format!("wav:{}", path.display()),
            format,
            volume,
        })
    }
}

impl AudioOutput for WavAudio {
    fn submit(&mut self, mut playback: Playback) -> Result<(), AudioError> {
        let writer = self.writer.as_mut()
            .ok_or_else(|| AudioError::Device("WAV output is closed".into()))?;
        let mut buf = vec![SILENT; self.format.buffer_frames()];
        loop {
            let (n, more) = playback.read(&mut buf);
            if !more { break; }
            for frame in &buf[..n] {
                for c in 0..self.format.channels as usize {
                    writer.write_sample(frame[c.min(1)] * self.volume).map_err(AudioError::device)?;
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        if let Some(w) = self.writer.take() {
            w.finalize().map_err(AudioError::device)?;
        }
        Ok(())
    }

    fn name(&self) -> &str { &self.name }
}
