//! Simulated controllers for host-side development.
//!
//! A `SimulatedController` behaves like a real panel without hardware:
//! render logs the grid, identify sleeps long enough to watch the busy
//! state in the web utility.

use super::{Controller, TransportError};
use crate::entities::Grid;
use log::{debug, info};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const IDENTIFY_BLINK: Duration = Duration::from_millis(400);

/// Fake LED matrix that renders to the log.
pub struct SimulatedController {
    name: String,
    description: String,
    width: usize,
    height: usize,
}

impl SimulatedController {
    pub fn new(index: usize, width: usize, height: usize) -> Self {
        Self {
            name: format!("sim-{}", index),
            description: format!("Simulated {}x{} matrix", width, height),
            width,
            height,
        }
    }
}

impl Controller for SimulatedController {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn render(&self, grid: &Grid) -> Result<(), TransportError> {
        if grid.shape() != (self.width, self.height) {
            return Err(TransportError::WrongShape {
                expected: (self.width, self.height),
                found: grid.shape(),
            });
        }
        for line in grid.to_ascii().lines() {
            debug!("[{}] {}", self.name, line);
        }
        info!(
            "{}: rendered {}x{} grid, {} lit",
            self.name,
            grid.width(),
            grid.height(),
            grid.lit()
        );
        Ok(())
    }

    fn identify(&self) -> Result<(), TransportError> {
        info!("{}: identify blink", self.name);
        thread::sleep(IDENTIFY_BLINK);
        Ok(())
    }
}

/// Build `count` simulated controllers named sim-0, sim-1, ...
pub fn controllers(count: usize, width: usize, height: usize) -> Vec<Arc<dyn Controller>> {
    (0..count)
        .map(|i| Arc::new(SimulatedController::new(i, width, height)) as Arc<dyn Controller>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: simulated render shape guard
    /// Validates: only grids matching the panel shape are accepted
    #[test]
    fn test_render_checks_shape() {
        let sim = SimulatedController::new(0, 4, 4);
        assert_eq!(sim.name(), "sim-0");
        assert!(sim.render(&Grid::blank(4, 4).unwrap()).is_ok());
        assert_eq!(
            sim.render(&Grid::blank(4, 5).unwrap()),
            Err(TransportError::WrongShape {
                expected: (4, 4),
                found: (4, 5)
            })
        );
    }

    #[test]
    fn test_controllers_are_numbered() {
        let list = controllers(3, 9, 34);
        let names: Vec<&str> = list.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["sim-0", "sim-1", "sim-2"]);
    }
}
