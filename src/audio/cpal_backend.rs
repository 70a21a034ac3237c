// src/audio/cpal_backend.rs  —  cpal output pulling frames from a Playback
use super::{AudioError, AudioOutput, Format, Frame, Playback, SILENT};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleFormat, SampleRate, Stream, StreamConfig, SupportedBufferSize};
use std::sync::{Arc, Mutex};

struct SharedState {
    playback: Option<Playback>,
    volume:   f32,
}

pub struct CpalAudio {
    state:   Arc<Mutex<SharedState>>,
    stream:  Stream,
    name:    String,
}

// Stream is !Send on some platforms; wrap it
unsafe impl Send for CpalAudio {}

impl CpalAudio {
    pub fn new(format: Format, volume: f32) -> Result<Self, AudioError> {
        let host   = cpal::default_host();
        let device = host.default_output_device()
            .ok_or_else(|| AudioError::Device("no output device".into()))?;
        let name = device.name().unwrap_or_else(|_| "unknown".into());

        let sr = format.sample_rate;
        let supported = device.supported_output_configs()
            .map_err(AudioError::device)?
            .filter(|c| c.channels() == format.channels)
            .find(|c| c.min_sample_rate().0 <= sr && sr <= c.max_sample_rate().0)
            .ok_or_else(|| AudioError::Device(format!(
                "{name} cannot play {} channels at {sr} Hz", format.channels
            )))?;

        let want = format.buffer_frames() as u32;
        let buffer_size = match supported.buffer_size() {
            SupportedBufferSize::Range { min, max } if *min <= want && want <= *max => BufferSize::Fixed(want),
            _ => BufferSize::Default,
        };
        let config = StreamConfig {
            channels:    format.channels,
            sample_rate: SampleRate(sr),
            buffer_size,
        };

        let state = Arc::new(Mutex::new(SharedState { playback: None, volume }));
        let st = Arc::clone(&state);
        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, st)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, st)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, st)?,
            other             => return Err(AudioError::Device(format!("unsupported sample format {other:?}"))),
        };
        stream.play().map_err(AudioError::device)?;
        log::info!("[audio] cpal output {name:?}: {sr} Hz, {} ch, buffer {:?}", format.channels, config.buffer_size);
        Ok(Self { state, stream, name })
    }
}

fn build_stream<S>(
    device: &cpal::Device,
    config: &StreamConfig,
    state:  Arc<Mutex<SharedState>>,
) -> Result<Stream, AudioError>
where S: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>
{
    let ch = config.channels as usize;
    let mut scratch: Vec<Frame> = Vec::new();
    let stream = device.build_output_stream(
        config,
        move |data: &mut [S], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / ch;
            if scratch.len() < frames { scratch.resize(frames, SILENT); }
            let buf = &mut scratch[..frames];

            let mut filled = 0;
            let mut volume = 0.0;
            // A poisoned lock renders silence
            if let Ok(mut s) = state.lock() {
                volume = s.volume;
                let done = match s.playback.as_mut() {
                    Some(pb) => {
                        let (n, more) = pb.read(buf);
                        filled = n;
                        !more || pb.is_finished()
                    }
                    None => false,
                };
                if done { s.playback = None; }
            }
            buf[filled..].fill(SILENT);

            for (frame, src) in data.chunks_mut(ch).zip(buf.iter()) {
                for (c, smp) in frame.iter_mut().enumerate() {
                    *smp = S::from_sample(src[c.min(1)] * volume);
                }
            }
        },
        |e| log::error!("Audio error: {e}"),
        None,
    ).map_err(AudioError::device)?;
    Ok(stream)
}

impl AudioOutput for CpalAudio {
    fn submit(&mut self, playback: Playback) -> Result<(), AudioError> {
        let mut s = self.state.lock()
            .map_err(|_| AudioError::Device("audio state poisoned".into()))?;
        if s.playback.is_some() {
            return Err(AudioError::Device("a playback is already in flight".into()));
        }
        log::debug!("[audio] submit {} frames", playback.total_frames());
        s.playback = Some(playback);
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        if let Ok(mut s) = self.state.lock() {
            // Dropping an unfinished playback releases its waiter
            s.playback = None;
        }
        self.stream.pause().map_err(AudioError::device)
    }

    fn name(&self) -> &str { &self.name }
}
