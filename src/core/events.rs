//! Editor change notifications.
//!
//! The editor pushes fine-grained events over a crossbeam channel so a
//! front-end can repaint only what changed: a single cell after a toggle,
//! the whole grid after a frame switch or a load. The sender is optional;
//! a headless editor runs with a dummy and the emits become no-ops.

use crossbeam_channel::Sender;

/// What changed inside the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// One cell of the current frame flipped.
    CellToggled { col: usize, row: usize, lit: bool },
    /// The current frame changed (cursor moved, frame added, duration set).
    /// Front-ends repaint the grid and the frame indicator.
    FrameChanged {
        index: usize,
        total: usize,
        duration: f64,
    },
    /// The whole frame list was swapped out by a load.
    SequenceReplaced { frames: usize },
}

/// Channel handle the editor emits events through.
///
/// Send failures are ignored: a disconnected or absent listener must never
/// break editing.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Option<Sender<EditorEvent>>,
}

impl EventSender {
    pub fn new(sender: Sender<EditorEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Sender without a channel, for headless use and tests.
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, event: EditorEvent) {
        if let Some(ref sender) = self.sender {
            let _ = sender.send(event);
        }
    }
}

impl Default for EventSender {
    fn default() -> Self {
        Self::dummy()
    }
}
