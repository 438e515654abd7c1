//! Controller seam: the boundary between the editor and LED hardware.
//!
//! A `Controller` is one attached matrix. Implementations own the actual
//! transport; everything above this trait only deals in grids and names.
//! Controllers are shared as `Arc<dyn Controller>` so identify tasks can
//! run against them from worker threads.

pub mod sim;

use crate::entities::Grid;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Failures crossing the device boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Device went away or never answered.
    Disconnected,
    /// Grid shape does not match the panel.
    WrongShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Anything else the transport reports.
    Failed(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Disconnected => write!(f, "device disconnected"),
            TransportError::WrongShape { expected, found } => write!(
                f,
                "panel is {}x{}, grid is {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            TransportError::Failed(msg) => write!(f, "transport failure: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// One attached LED matrix controller.
pub trait Controller: Send + Sync {
    /// Stable name used for selection ("sim-0", "desk-left", ...).
    fn name(&self) -> &str;

    /// Human-readable description shown in chooser lists.
    fn description(&self) -> &str;

    /// Push a grid to the panel.
    fn render(&self, grid: &Grid) -> Result<(), TransportError>;

    /// Make the physical device visibly identify itself. Blocks until the
    /// blink sequence is done.
    fn identify(&self) -> Result<(), TransportError>;
}

/// Name and description of a controller, as shown in chooser lists and
/// the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerInfo {
    pub name: String,
    pub description: String,
}

impl ControllerInfo {
    pub fn of(controller: &dyn Controller) -> Self {
        Self {
            name: controller.name().to_string(),
            description: controller.description().to_string(),
        }
    }
}

/// Look up a controller by name.
pub fn find<'a>(
    controllers: &'a [Arc<dyn Controller>],
    name: &str,
) -> Option<&'a Arc<dyn Controller>> {
    controllers.iter().find(|c| c.name() == name)
}
