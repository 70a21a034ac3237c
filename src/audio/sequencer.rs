// src/audio/sequencer.rs  —  EncodedMessage → ordered tone/silence segments
use super::gate::CompletionSignal;
use super::stream::{SampleStream, Segment, Silence, ToneCursor};
use super::tone::ToneBuffer;
use super::{AudioError, Format, Frame};
use crate::morse::message::{DASH, DOT};
use crate::morse::{EncodedMessage, Timing};
use std::time::Duration;

/// Flattened segments for one message, built per send and consumed once
#[derive(Debug, Clone)]
pub struct PlaybackSequence {
    segments: Vec<Segment>,
    format:   Format,
}

impl PlaybackSequence {
    pub fn segments(&self) -> &[Segment] { &self.segments }

    pub fn tone_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_tone()).count()
    }

    pub fn total_frames(&self) -> usize {
        self.segments.iter().map(SampleStream::len).sum()
    }

    pub fn duration(&self) -> Duration {
        self.format.duration(self.total_frames())
    }

    /// Concatenate into one stream that fires `signal` after its last frame
    pub fn into_playback(self, signal: CompletionSignal) -> Playback {
        Playback::new(self.segments, Some(signal))
    }
}

/// Build the segment list for `message`.
///
/// Every dot/dash is followed by one element gap (the last one in a character
/// included).  Characters in a non-prosign word are split by a letter gap and
/// every word ends with a word gap.
pub fn build_sequence(
    message: &EncodedMessage,
    dit:     &ToneBuffer,
    dash:    &ToneBuffer,
    timing:  &Timing,
) -> Result<PlaybackSequence, AudioError> {
    let format = dit.format();
    debug_assert_eq!(format, dash.format());

    let elem_gap   = format.frames(timing.elem_gap);
    let letter_gap = format.frames(timing.char_gap);
    let word_gap   = format.frames(timing.word_gap);

    let n_chars: usize = message.words().iter().map(|w| w.len()).sum();
    let mut segments = Vec::with_capacity(message.token_count() * 2 + n_chars + message.words().len());

    for word in message.words() {
        let last = word.len().saturating_sub(1);
        for (i, ch) in word.chars().iter().enumerate() {
            for sym in ch.symbols() {
                let tone = match sym {
                    DOT  => dit,
                    DASH => dash,
                    other => return Err(AudioError::InvalidToken(other)),
                };
                segments.push(Segment::Tone(ToneCursor::new(tone.shared())));
                segments.push(Segment::Silence(Silence::new(elem_gap)));
            }
            if !word.is_prosign() && i != last {
                segments.push(Segment::Silence(Silence::new(letter_gap)));
            }
        }
        segments.push(Segment::Silence(Silence::new(word_gap)));
    }

    Ok(PlaybackSequence { segments, format })
}

/// A submitted sequence as the output device sees it: one gapless stream
/// followed by a zero-length completion marker.
#[derive(Debug)]
pub struct Playback {
    segments: Vec<Segment>,
    current:  usize,
    marker:   Option<CompletionSignal>,
}

impl Playback {
    fn new(segments: Vec<Segment>, marker: Option<CompletionSignal>) -> Self {
        Self { segments, current: 0, marker }
    }

    fn skip_exhausted(&mut self) {
        while self.current < self.segments.len() && self.segments[self.current].remaining() == 0 {
            self.current += 1;
        }
    }

    /// Fill `out` across segment boundaries.  Reaching the end fires the
    /// marker, once.  Returns `false` when finished and nothing was copied.
    pub fn read(&mut self, out: &mut [Frame]) -> (usize, bool) {
        let mut filled = 0;
        loop {
            self.skip_exhausted();
            if filled == out.len() || self.current == self.segments.len() {
                break;
            }
            let (n, _) = self.segments[self.current].read(&mut out[filled..]);
            filled += n;
        }
        if self.current == self.segments.len() {
            if let Some(signal) = self.marker.take() {
                signal.fire();
            }
        }
        (filled, filled > 0 || self.current < self.segments.len())
    }

    pub fn is_finished(&self) -> bool {
        self.current == self.segments.len() && self.marker.is_none()
    }

    pub fn total_frames(&self) -> usize {
        self.segments.iter().map(SampleStream::len).sum()
    }
}
