//! Core engine modules - editing, events, identify, playback.
//!
//! These modules carry all behavior, independent of any front-end.

pub mod editor;
pub mod events;
pub mod identify;
pub mod player;

// Re-exports for convenience
pub use editor::{Editor, EditorCommand, EditorError, Outcome};
pub use events::{EditorEvent, EventSender};
pub use identify::{IdentifyError, IdentifyJob, JobStatus, Selection, TaskReport};
pub use player::Player;
