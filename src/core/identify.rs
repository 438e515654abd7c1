//! Concurrent identify dispatch.
//!
//! One worker thread per selected controller runs its blocking
//! `identify()`; results come back over a channel and are aggregated by
//! `IdentifyJob`. The job is a non-blocking handle: callers poll it for
//! progress and get the full failure list once every task reported.
//! A panicking task is converted into a failure report, so the job always
//! completes.

use crate::device::{self, Controller, TransportError};
use crossbeam_channel::{unbounded, Receiver};
use log::{info, warn};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

/// Chooser label meaning "identify every controller".
pub const ALL: &str = "All";

/// Which controllers an identify run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    One(String),
}

impl Selection {
    /// Parse a chooser label: the `All` sentinel, otherwise a controller
    /// name.
    pub fn parse(label: &str) -> Self {
        if label == ALL {
            Selection::All
        } else {
            Selection::One(label.to_string())
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL),
            Selection::One(name) => write!(f, "{}", name),
        }
    }
}

/// Outcome of one identify task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub controller: String,
    pub result: Result<(), TransportError>,
}

/// Snapshot of a job's progress.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending { finished: usize, total: usize },
    /// Every task reported; `failures` holds only the failed ones.
    Complete { failures: Vec<TaskReport> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    NoControllers,
    UnknownController(String),
}

impl fmt::Display for IdentifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifyError::NoControllers => write!(f, "no controllers attached"),
            IdentifyError::UnknownController(name) => {
                write!(f, "unknown controller: {}", name)
            }
        }
    }
}

impl std::error::Error for IdentifyError {}

/// Handle to a batch of identify threads.
pub struct IdentifyJob {
    total: usize,
    reports: Vec<TaskReport>,
    rx: Receiver<TaskReport>,
}

impl IdentifyJob {
    /// Launch one named worker thread per selected controller and return
    /// immediately.
    pub fn spawn(
        selection: &Selection,
        controllers: &[Arc<dyn Controller>],
    ) -> Result<Self, IdentifyError> {
        if controllers.is_empty() {
            return Err(IdentifyError::NoControllers);
        }
        let targets: Vec<Arc<dyn Controller>> = match selection {
            Selection::All => controllers.to_vec(),
            Selection::One(name) => {
                let controller = device::find(controllers, name)
                    .ok_or_else(|| IdentifyError::UnknownController(name.clone()))?;
                vec![Arc::clone(controller)]
            }
        };

        let (tx, rx) = unbounded();
        let total = targets.len();
        for controller in targets {
            let tx = tx.clone();
            let name = controller.name().to_string();
            thread::Builder::new()
                .name(format!("identify-{}", name))
                .spawn(move || {
                    let result = catch_unwind(AssertUnwindSafe(|| controller.identify()))
                        .unwrap_or_else(|_| {
                            Err(TransportError::Failed("identify task panicked".to_string()))
                        });
                    // Receiver may already be dropped; nothing to do then.
                    let _ = tx.send(TaskReport {
                        controller: name,
                        result,
                    });
                })
                .expect("failed to spawn identify thread");
        }
        info!("identify: launched {} task(s) for {}", total, selection);
        Ok(Self {
            total,
            reports: Vec::new(),
            rx,
        })
    }

    /// Drain finished tasks without blocking and report progress.
    pub fn poll(&mut self) -> JobStatus {
        while let Ok(report) = self.rx.try_recv() {
            match &report.result {
                Ok(()) => info!("identify done on {}", report.controller),
                Err(err) => warn!("identify failed on {}: {}", report.controller, err),
            }
            self.reports.push(report);
        }
        if self.reports.len() >= self.total {
            JobStatus::Complete {
                failures: self
                    .reports
                    .iter()
                    .filter(|r| r.result.is_err())
                    .cloned()
                    .collect(),
            }
        } else {
            JobStatus::Pending {
                finished: self.reports.len(),
                total: self.total,
            }
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Tasks seen so far, as of the last `poll`.
    pub fn finished(&self) -> usize {
        self.reports.len()
    }

    pub fn reports(&self) -> &[TaskReport] {
        &self.reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    struct MockController {
        name: String,
        calls: Arc<AtomicUsize>,
        fail: bool,
        panic: bool,
    }

    impl MockController {
        fn new(name: &str) -> (Arc<dyn Controller>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let controller = Arc::new(Self {
                name: name.to_string(),
                calls: Arc::clone(&calls),
                fail: false,
                panic: false,
            });
            (controller, calls)
        }

        fn failing(name: &str) -> Arc<dyn Controller> {
            Arc::new(Self {
                name: name.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
                fail: true,
                panic: false,
            })
        }

        fn panicking(name: &str) -> Arc<dyn Controller> {
            Arc::new(Self {
                name: name.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
                fail: false,
                panic: true,
            })
        }
    }

    impl Controller for MockController {
        fn name(&self) -> &str {
            &self.name
        }
        fn description(&self) -> &str {
            "mock"
        }
        fn render(&self, _grid: &crate::entities::Grid) -> Result<(), TransportError> {
            Ok(())
        }
        fn identify(&self) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(10));
            if self.panic {
                panic!("boom");
            }
            if self.fail {
                Err(TransportError::Failed("injected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn wait_complete(job: &mut IdentifyJob) -> Vec<TaskReport> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let JobStatus::Complete { failures } = job.poll() {
                return failures;
            }
            assert!(Instant::now() < deadline, "identify job never completed");
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Test: All selection fan-out
    /// Validates: every controller is identified exactly once, concurrently
    #[test]
    fn test_all_runs_every_controller() {
        let (a, a_calls) = MockController::new("m-0");
        let (b, b_calls) = MockController::new("m-1");
        let (c, c_calls) = MockController::new("m-2");
        let controllers = vec![a, b, c];

        let mut job = IdentifyJob::spawn(&Selection::All, &controllers).unwrap();
        assert_eq!(job.total(), 3);
        let failures = wait_complete(&mut job);
        assert!(failures.is_empty());
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c_calls.load(Ordering::SeqCst), 1);
    }

    /// Test: single selection
    /// Validates: only the named controller runs
    #[test]
    fn test_one_targets_named_controller() {
        let (a, a_calls) = MockController::new("m-0");
        let (b, b_calls) = MockController::new("m-1");
        let controllers = vec![a, b];

        let mut job =
            IdentifyJob::spawn(&Selection::One("m-1".to_string()), &controllers).unwrap();
        assert_eq!(job.total(), 1);
        wait_complete(&mut job);
        assert_eq!(a_calls.load(Ordering::SeqCst), 0);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    }

    /// Test: spawn rejections
    /// Validates: empty controller lists and unknown names are typed errors
    #[test]
    fn test_spawn_rejections() {
        assert_eq!(
            IdentifyJob::spawn(&Selection::All, &[]).err(),
            Some(IdentifyError::NoControllers)
        );

        let (a, _) = MockController::new("m-0");
        assert_eq!(
            IdentifyJob::spawn(&Selection::One("ghost".to_string()), &[a]).err(),
            Some(IdentifyError::UnknownController("ghost".to_string()))
        );
    }

    /// Test: failure aggregation
    /// Validates: one failing task does not hide the others; the completed
    /// job lists exactly the failed controllers
    #[test]
    fn test_failures_are_aggregated() {
        let (a, a_calls) = MockController::new("m-0");
        let bad = MockController::failing("m-1");
        let (c, c_calls) = MockController::new("m-2");
        let controllers = vec![a, bad, c];

        let mut job = IdentifyJob::spawn(&Selection::All, &controllers).unwrap();
        let failures = wait_complete(&mut job);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].controller, "m-1");
        assert!(failures[0].result.is_err());
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c_calls.load(Ordering::SeqCst), 1);
        assert_eq!(job.finished(), 3);
    }

    /// Test: panicking task
    /// Validates: a panic inside identify() becomes a failure report and
    /// the job still completes
    #[test]
    fn test_panic_becomes_failure_report() {
        let controllers = vec![MockController::panicking("m-0")];
        let mut job = IdentifyJob::spawn(&Selection::All, &controllers).unwrap();
        let failures = wait_complete(&mut job);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].result,
            Err(TransportError::Failed("identify task panicked".to_string()))
        );
    }

    /// Test: selection labels
    /// Validates: the All sentinel parses specially, anything else is a name
    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(
            Selection::parse("sim-0"),
            Selection::One("sim-0".to_string())
        );
        assert_eq!(Selection::parse("all"), Selection::One("all".to_string()));
    }
}
