// src/audio/stream.rs  —  Seekable cursors over tone buffers and silence
use super::{AudioError, Frame, SILENT};
use std::sync::Arc;

/// Lazy, finite, restartable sequence of stereo frames
pub trait SampleStream {
    /// Copy frames from the cursor into `out`.  Returns the number copied and
    /// `false` once the stream is exhausted and nothing was copied.
    fn read(&mut self, out: &mut [Frame]) -> (usize, bool);
    fn len(&self) -> usize;
    fn position(&self) -> usize;
    fn seek(&mut self, pos: usize) -> Result<(), AudioError>;

    /// Back to the first frame; seeking to 0 cannot fail.
    fn reset(&mut self) {
        let _ = self.seek(0);
    }

    fn remaining(&self) -> usize { self.len() - self.position() }
}

fn check_seek(pos: usize, len: usize) -> Result<(), AudioError> {
    if pos > len {
        return Err(AudioError::OutOfRangeSeek { pos, len });
    }
    Ok(())
}

/// Cursor over a shared, immutable sample buffer.
///
/// Each playback gets its own cursor; any number of them may read the same
/// backing buffer at once.
#[derive(Debug, Clone)]
pub struct ToneCursor {
    samples: Arc<[Frame]>,
    pos:     usize,
}

impl ToneCursor {
    pub fn new(samples: Arc<[Frame]>) -> Self {
        Self { samples, pos: 0 }
    }
}

impl SampleStream for ToneCursor {
    fn read(&mut self, out: &mut [Frame]) -> (usize, bool) {
        let remaining = self.remaining();
        if remaining == 0 {
            return (0, out.is_empty());
        }
        let n = remaining.min(out.len());
        out[..n].copy_from_slice(&self.samples[self.pos..self.pos + n]);
        self.pos += n;
        (n, true)
    }

    fn len(&self) -> usize { self.samples.len() }
    fn position(&self) -> usize { self.pos }

    fn seek(&mut self, pos: usize) -> Result<(), AudioError> {
        check_seek(pos, self.len())?;
        self.pos = pos;
        Ok(())
    }
}

/// A run of zero frames of fixed length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Silence {
    len: usize,
    pos: usize,
}

impl Silence {
    pub fn new(len: usize) -> Self { Self { len, pos: 0 } }
}

impl SampleStream for Silence {
    fn read(&mut self, out: &mut [Frame]) -> (usize, bool) {
        let remaining = self.remaining();
        if remaining == 0 {
            return (0, out.is_empty());
        }
        let n = remaining.min(out.len());
        out[..n].fill(SILENT);
        self.pos += n;
        (n, true)
    }

    fn len(&self) -> usize { self.len }
    fn position(&self) -> usize { self.pos }

    fn seek(&mut self, pos: usize) -> Result<(), AudioError> {
        check_seek(pos, self.len)?;
        self.pos = pos;
        Ok(())
    }
}

/// The two kinds of segment a playback sequence is made of
#[derive(Debug, Clone)]
pub enum Segment {
    Tone(ToneCursor),
    Silence(Silence),
}

impl Segment {
    pub fn is_tone(&self) -> bool { matches!(self, Segment::Tone(_)) }
}

impl SampleStream for Segment {
    fn read(&mut self, out: &mut [Frame]) -> (usize, bool) {
        match self {
            Segment::Tone(s)    => s.read(out),
            Segment::Silence(s) => s.read(out),
        }
    }

    fn len(&self) -> usize {
        match self {
            Segment::Tone(s)    => s.len(),
            Segment::Silence(s) => s.len(),
        }
    }

    fn position(&self) -> usize {
        match self {
            Segment::Tone(s)    => s.position(),
            Segment::Silence(s) => s.position(),
        }
    }

    fn seek(&mut self, pos: usize) -> Result<(), AudioError> {
        match self {
            Segment::Tone(s)    => s.seek(pos),
            Segment::Silence(s) => s.seek(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Arc<[Frame]> {
        (0..n).map(|i| [i as f32, i as f32]).collect::<Vec<_>>().into()
    }

    #[test]
    fn read_fills_and_advances() {
        let mut c = ToneCursor::new(ramp(10));
        let mut buf = [[0.0; 2]; 4];
        assert_eq!(c.read(&mut buf), (4, true));
        assert_eq!(buf[3], [3.0, 3.0]);
        assert_eq!(c.position(), 4);
        assert_eq!(c.read(&mut buf), (4, true));
        // partial read still reports more
        assert_eq!(c.read(&mut buf), (2, true));
        assert_eq!(buf[1], [9.0, 9.0]);
        assert_eq!(c.read(&mut buf), (0, false));
    }

    #[test]
    fn seek_round_trips_within_bounds() {
        let mut c = ToneCursor::new(ramp(10));
        for p in 0..=c.len() {
            c.seek(p).unwrap();
            assert_eq!(c.position(), p);
        }
        assert_eq!(c.seek(11), Err(AudioError::OutOfRangeSeek { pos: 11, len: 10 }));
        // failed seek leaves the cursor alone
        assert_eq!(c.position(), 10);
    }

    #[test]
    fn reset_matches_seek_zero() {
        let mut a = ToneCursor::new(ramp(5));
        let mut b = a.clone();
        let mut buf = [[0.0; 2]; 3];
        a.read(&mut buf);
        b.read(&mut buf);
        a.reset();
        b.seek(0).unwrap();
        let mut fa = [[9.0; 2]; 1];
        let mut fb = [[9.0; 2]; 1];
        a.read(&mut fa);
        b.read(&mut fb);
        assert_eq!(fa, [[0.0, 0.0]]);
        assert_eq!(fa, fb);
    }

    #[test]
    fn cursors_over_same_buffer_are_independent() {
        let shared = ramp(6);
        let mut a = ToneCursor::new(Arc::clone(&shared));
        let mut b = ToneCursor::new(shared);
        let mut buf = [[0.0; 2]; 4];
        a.read(&mut buf);
        assert_eq!(b.position(), 0);
        let mut one = [[0.0; 2]; 1];
        b.read(&mut one);
        assert_eq!(one[0], [0.0, 0.0]);
        assert_eq!(a.position(), 4);
    }

    #[test]
    fn silence_yields_zeros() {
        let mut s = Silence::new(3);
        let mut buf = [[1.0; 2]; 5];
        assert_eq!(s.read(&mut buf), (3, true));
        assert!(buf[..3].iter().all(|f| *f == [0.0, 0.0]));
        assert_eq!(buf[3], [1.0, 1.0]);
        assert_eq!(s.read(&mut buf), (0, false));
        assert!(s.seek(4).is_err());
        s.reset();
        assert_eq!(s.remaining(), 3);
    }

    #[test]
    fn segment_dispatches_by_variant() {
        let mut seg = Segment::Silence(Silence::new(2));
        assert!(!seg.is_tone());
        assert_eq!(seg.len(), 2);
        let mut t = Segment::Tone(ToneCursor::new(ramp(3)));
        assert!(t.is_tone());
        t.seek(3).unwrap();
        let mut buf = [[0.0; 2]; 1];
        assert_eq!(t.read(&mut buf), (0, false));
        seg.seek(1).unwrap();
        assert_eq!(seg.position(), 1);
    }

    #[test]
    fn empty_destination_is_not_end_of_data() {
        let mut s = Silence::new(0);
        assert_eq!(s.read(&mut []), (0, true));
        let mut buf = [[0.0; 2]; 1];
        assert_eq!(s.read(&mut buf), (0, false));
    }
}
