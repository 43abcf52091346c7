use async_channel::{Receiver, Sender};

/// Coalescing change signal with bounded capacity of 1.
///
/// `notify` never blocks: when a tick is already pending the new one is
/// dropped, and the subscriber re-reads the session snapshot when the
/// pending tick is consumed. Polling the snapshot directly remains an
/// equally valid way to observe the session.
pub struct ChangeSignal {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl ChangeSignal {
    /// Create a new change signal with bounded capacity of 1
    pub fn new() -> Self {
        let (tx, rx) = async_channel::bounded(1);
        Self { tx, rx }
    }

    /// Signal that session state changed
    pub fn notify(&self) {
        let _ = self.tx.try_send(());
    }

    /// Get a receiver for change ticks
    pub fn subscribe(&self) -> Receiver<()> {
        self.rx.clone()
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}
