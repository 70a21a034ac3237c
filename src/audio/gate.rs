// src/audio/gate.rs  —  One-shot "playback finished" rendezvous
use super::AudioError;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

/// Fired by the output once it has delivered the last frame of a playback.
/// Consumed on use, so it can fire at most once.
#[derive(Debug)]
pub struct CompletionSignal(SyncSender<()>);

impl CompletionSignal {
    pub fn fire(self) {
        // Receiver gone means nobody is waiting any more
        let _ = self.0.try_send(());
    }
}

/// Waiting half of the rendezvous, held by the submitting thread
#[derive(Debug)]
pub struct CompletionGate(Receiver<()>);

impl CompletionGate {
    pub fn new() -> (CompletionSignal, CompletionGate) {
        let (tx, rx) = sync_channel(1);
        (CompletionSignal(tx), CompletionGate(rx))
    }

    /// Block until the signal fires.  Fails if the signal was dropped
    /// unfired (the output went away mid-playback).
    pub fn wait(self) -> Result<(), AudioError> {
        self.0
            .recv()
            .map_err(|_| AudioError::Device("playback abandoned before completion".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn wait_returns_after_fire_on_other_thread() {
        let (signal, gate) = CompletionGate::new();
        let h = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            signal.fire();
        });
        assert!(gate.wait().is_ok());
        h.join().unwrap();
    }

    #[test]
    fn fire_before_wait_is_not_lost() {
        let (signal, gate) = CompletionGate::new();
        signal.fire();
        assert!(gate.wait().is_ok());
    }

    #[test]
    fn dropped_signal_is_a_device_error() {
        let (signal, gate) = CompletionGate::new();
        drop(signal);
        assert!(matches!(gate.wait(), Err(AudioError::Device(_))));
    }

    #[test]
    fn fire_without_waiter_does_not_panic() {
        let (signal, gate) = CompletionGate::new();
        drop(gate);
        signal.fire();
    }
}
