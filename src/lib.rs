//! pixa - LED matrix grid editor and identify utility library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (editor, events, identify, player)
pub mod core;

// App modules
pub mod cli;
pub mod device;
pub mod entities;
pub mod server;
pub mod shell;

// Re-export commonly used types from core
pub use core::editor::{Editor, EditorCommand, EditorError, Outcome};
pub use core::events::{EditorEvent, EventSender};
pub use core::identify::{IdentifyError, IdentifyJob, JobStatus, Selection, TaskReport};
pub use core::player::Player;

// Re-export entities
pub use entities::{Animation, DocError, Document, Frame, Grid};

// Re-export the device seam
pub use device::{Controller, ControllerInfo, TransportError};
