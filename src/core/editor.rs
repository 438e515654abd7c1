//! Command-driven grid editor.
//!
//! Front-ends build `EditorCommand`s and hand them to `Editor::apply`,
//! the single dispatch point. Every command returns an `Outcome` (or a
//! typed error) so callers can report precisely, and mutations also emit
//! `EditorEvent`s for incremental repaints.
//!
//! Device sends go through the preferred controller when one is set.
//! Without one, `apply` does not prompt: it returns
//! `Outcome::SelectionRequired` with the chooser list, and the front-end
//! finishes the send with `send_to` (and optionally `set_preferred`).

use crate::core::events::{EditorEvent, EventSender};
use crate::device::{self, Controller, ControllerInfo, TransportError};
use crate::entities::{Animation, DocError, Document, Frame, FrameError, GridError};
use log::info;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a front-end can ask the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Flip one cell of the current frame.
    ToggleCell { col: usize, row: usize },
    /// Append a copy of the current frame and select it.
    AddFrame,
    /// Select the previous frame; no-op at the first.
    PrevFrame,
    /// Select the next frame; no-op at the last.
    NextFrame,
    /// Set the current frame's duration in seconds.
    SetDuration(f64),
    /// Snapshot the animation as a document without touching disk.
    Export,
    /// Save the animation to a JSON file.
    ExportToFile(PathBuf),
    /// Replace the animation with the contents of a JSON file.
    LoadFromFile(PathBuf),
    /// Push the current frame's grid to the preferred controller.
    SendToDevice,
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Toggled { col: usize, row: usize, lit: bool },
    FrameAdded { index: usize, total: usize },
    /// Cursor position after PrevFrame/NextFrame, moved or not.
    FrameSelected { index: usize, total: usize },
    DurationSet { index: usize, secs: f64 },
    Exported(Document),
    Saved { path: PathBuf, frames: usize },
    Loaded { path: PathBuf, frames: usize },
    /// No preferred controller: the front-end must pick one from this list
    /// and call `send_to`.
    SelectionRequired(Vec<ControllerInfo>),
    Sent { controller: String },
}

#[derive(Debug)]
pub enum EditorError {
    Grid(GridError),
    Frame(FrameError),
    Doc(DocError),
    NoControllers,
    UnknownController(String),
    Transport {
        controller: String,
        error: TransportError,
    },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::Grid(e) => write!(f, "{}", e),
            EditorError::Frame(e) => write!(f, "{}", e),
            EditorError::Doc(e) => write!(f, "{}", e),
            EditorError::NoControllers => write!(f, "no controllers attached"),
            EditorError::UnknownController(name) => write!(f, "unknown controller: {}", name),
            EditorError::Transport { controller, error } => {
                write!(f, "send to {} failed: {}", controller, error)
            }
        }
    }
}

impl std::error::Error for EditorError {}

impl From<GridError> for EditorError {
    fn from(e: GridError) -> Self {
        EditorError::Grid(e)
    }
}

impl From<FrameError> for EditorError {
    fn from(e: FrameError) -> Self {
        EditorError::Frame(e)
    }
}

impl From<DocError> for EditorError {
    fn from(e: DocError) -> Self {
        EditorError::Doc(e)
    }
}

/// Animation, attached controllers and the remembered device choice.
pub struct Editor {
    animation: Animation,
    controllers: Vec<Arc<dyn Controller>>,
    preferred: Option<String>,
    events: EventSender,
}

impl Editor {
    /// New editor over a single blank frame of the given shape.
    pub fn new(
        width: usize,
        height: usize,
        controllers: Vec<Arc<dyn Controller>>,
    ) -> Result<Self, GridError> {
        Ok(Self {
            animation: Animation::new(width, height)?,
            controllers,
            preferred: None,
            events: EventSender::dummy(),
        })
    }

    pub fn set_event_sender(&mut self, events: EventSender) {
        self.events = events;
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Mutable access for playback; every `Animation` mutator validates,
    /// so this cannot break frame invariants.
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    pub fn controllers(&self) -> &[Arc<dyn Controller>] {
        &self.controllers
    }

    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    /// Remember a controller so later sends skip the chooser.
    pub fn set_preferred(&mut self, name: &str) -> Result<(), EditorError> {
        if device::find(&self.controllers, name).is_none() {
            return Err(EditorError::UnknownController(name.to_string()));
        }
        info!("preferred controller: {}", name);
        self.preferred = Some(name.to_string());
        Ok(())
    }

    /// Apply one command. On error the editor state is unchanged.
    pub fn apply(&mut self, command: EditorCommand) -> Result<Outcome, EditorError> {
        match command {
            EditorCommand::ToggleCell { col, row } => self.toggle_cell(col, row),
            EditorCommand::AddFrame => self.add_frame(),
            EditorCommand::PrevFrame => self.select_prev(),
            EditorCommand::NextFrame => self.select_next(),
            EditorCommand::SetDuration(secs) => self.set_duration(secs),
            EditorCommand::Export => Ok(Outcome::Exported(Document::from_animation(
                &self.animation,
            ))),
            EditorCommand::ExportToFile(path) => self.export_to_file(path),
            EditorCommand::LoadFromFile(path) => self.load_from_file(path),
            EditorCommand::SendToDevice => self.send_to_device(),
        }
    }

    fn toggle_cell(&mut self, col: usize, row: usize) -> Result<Outcome, EditorError> {
        let lit = self.animation.toggle(col, row)?;
        self.events.emit(EditorEvent::CellToggled { col, row, lit });
        Ok(Outcome::Toggled { col, row, lit })
    }

    fn add_frame(&mut self) -> Result<Outcome, EditorError> {
        let index = self.animation.add_frame();
        let total = self.animation.frame_count();
        info!("added frame {}/{}", index + 1, total);
        self.emit_frame_changed();
        Ok(Outcome::FrameAdded { index, total })
    }

    fn select_prev(&mut self) -> Result<Outcome, EditorError> {
        if self.animation.prev() {
            self.emit_frame_changed();
        }
        Ok(self.frame_selected())
    }

    fn select_next(&mut self) -> Result<Outcome, EditorError> {
        if self.animation.next() {
            self.emit_frame_changed();
        }
        Ok(self.frame_selected())
    }

    fn frame_selected(&self) -> Outcome {
        Outcome::FrameSelected {
            index: self.animation.current_index(),
            total: self.animation.frame_count(),
        }
    }

    fn set_duration(&mut self, secs: f64) -> Result<Outcome, EditorError> {
        self.animation.current_frame_mut().set_duration(secs)?;
        self.emit_frame_changed();
        Ok(Outcome::DurationSet {
            index: self.animation.current_index(),
            secs,
        })
    }

    fn export_to_file(&mut self, path: PathBuf) -> Result<Outcome, EditorError> {
        let doc = Document::from_animation(&self.animation);
        doc.save(&path)?;
        let frames = doc.frame_count();
        info!("saved {} frame(s) to {}", frames, path.display());
        Ok(Outcome::Saved { path, frames })
    }

    fn load_from_file(&mut self, path: PathBuf) -> Result<Outcome, EditorError> {
        let doc = Document::load(&path, self.animation.width(), self.animation.height())?;
        let frames: Vec<Frame> = doc.grids().into_iter().map(Frame::new).collect();
        let count = frames.len();
        self.animation.replace(frames)?;
        info!("loaded {} frame(s) from {}", count, path.display());
        self.events
            .emit(EditorEvent::SequenceReplaced { frames: count });
        self.emit_frame_changed();
        Ok(Outcome::Loaded {
            path,
            frames: count,
        })
    }

    fn send_to_device(&mut self) -> Result<Outcome, EditorError> {
        if self.controllers.is_empty() {
            return Err(EditorError::NoControllers);
        }
        match self.preferred.clone() {
            Some(name) => self.send_to(&name),
            None => Ok(Outcome::SelectionRequired(
                self.controllers
                    .iter()
                    .map(|c| ControllerInfo::of(c.as_ref()))
                    .collect(),
            )),
        }
    }

    /// Send the current frame's grid to a named controller, without
    /// changing the preferred choice.
    pub fn send_to(&mut self, name: &str) -> Result<Outcome, EditorError> {
        let controller = device::find(&self.controllers, name)
            .ok_or_else(|| EditorError::UnknownController(name.to_string()))?;
        controller
            .render(self.animation.current_frame().grid())
            .map_err(|error| EditorError::Transport {
                controller: name.to_string(),
                error,
            })?;
        info!("sent current frame to {}", name);
        Ok(Outcome::Sent {
            controller: name.to_string(),
        })
    }

    fn emit_frame_changed(&self) {
        self.events.emit(EditorEvent::FrameChanged {
            index: self.animation.current_index(),
            total: self.animation.frame_count(),
            duration: self.animation.current_frame().duration(),
        });
    }
}
