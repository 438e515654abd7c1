//! HTTP API implementation using rouille.
//!
//! # Purpose
//!
//! Core implementation of the identify utility's HTTP server. GET
//! endpoints read shared state; POST /api/identify launches an
//! `IdentifyJob` and stores its handle. There is no background poller:
//! every status read drains the job handle, so progress only has to be
//! computed when somebody asks.
//!
//! # Key types
//!
//! - [`ApiServer`] - HTTP server runner, blocks the calling thread
//! - [`ServerState`] - controllers plus the current job slot
//! - [`StatusResponse`] - JSON-serializable progress snapshot
//!
//! # Thread safety
//!
//! - the job slot sits behind a `Mutex` - handlers run on rouille's
//!   worker threads
//! - identify worker threads only touch their channel, never the slot
//! - CORS headers added to all responses for browser access

use crate::core::identify::{IdentifyError, IdentifyJob, JobStatus, Selection};
use crate::device::{Controller, ControllerInfo};
use crate::server::page::INDEX_HTML;
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Progress snapshot for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub busy: bool,
    pub finished: usize,
    pub total: usize,
    pub failures: Vec<FailureEntry>,
}

/// One failed identify task, flattened for JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    pub controller: String,
    pub error: String,
}

/// Results of the last finished job, kept until the next one starts.
#[derive(Debug, Clone, Default)]
struct CompletedJob {
    total: usize,
    failures: Vec<FailureEntry>,
}

/// The running job (if any) and the last completed one.
#[derive(Default)]
struct JobSlot {
    job: Option<IdentifyJob>,
    last: Option<CompletedJob>,
}

impl JobSlot {
    /// Drain the active job; on completion move its failures into `last`.
    fn refresh(&mut self) {
        let Some(job) = self.job.as_mut() else {
            return;
        };
        if let JobStatus::Complete { failures } = job.poll() {
            self.last = Some(CompletedJob {
                total: job.total(),
                failures: failures
                    .into_iter()
                    .map(|report| FailureEntry {
                        controller: report.controller,
                        error: match report.result {
                            Ok(()) => String::new(),
                            Err(e) => e.to_string(),
                        },
                    })
                    .collect(),
            });
            self.job = None;
        }
    }
}

/// State shared by all HTTP handlers.
pub struct ServerState {
    controllers: Vec<Arc<dyn Controller>>,
    slot: Mutex<JobSlot>,
}

impl ServerState {
    pub fn new(controllers: Vec<Arc<dyn Controller>>) -> Self {
        Self {
            controllers,
            slot: Mutex::new(JobSlot::default()),
        }
    }
}

/// Request body for POST /api/identify.
#[derive(Debug, Deserialize)]
struct IdentifyRequest {
    selection: String,
}

/// Generic API response
#[derive(Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn ok_msg(msg: &str) -> Self {
        Self {
            success: true,
            message: Some(msg.to_string()),
            error: None,
        }
    }

    fn err(msg: &str) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(msg.to_string()),
        }
    }
}

/// HTTP server for the identify utility.
pub struct ApiServer;

impl ApiServer {
    /// Serve forever on the calling thread.
    pub fn serve(port: u16, controllers: Vec<Arc<dyn Controller>>) -> ! {
        let addr = format!("0.0.0.0:{}", port);
        log::info!(
            "identify utility on http://{} ({} controller(s))",
            addr,
            controllers.len()
        );
        let state = Arc::new(ServerState::new(controllers));
        rouille::start_server(&addr, move |request| {
            Self::handle_request(request, &state)
        })
    }

    fn handle_request(request: &Request, state: &Arc<ServerState>) -> Response {
        // Handle preflight
        if request.method() == "OPTIONS" {
            return Response::empty_204()
                .with_additional_header("Access-Control-Allow-Origin", "*")
                .with_additional_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
                .with_additional_header("Access-Control-Allow-Headers", "Content-Type");
        }

        let response = rouille::router!(request,
            // Embedded control page
            (GET) ["/"] => {
                Response::html(INDEX_HTML)
            },

            (GET) ["/api/controllers"] => {
                Self::get_controllers(state)
            },
            (GET) ["/api/status"] => {
                Self::get_status(state)
            },
            (POST) ["/api/identify"] => {
                Self::post_identify(request, state)
            },

            // Health check
            (GET) ["/api/health"] => {
                Response::json(&ApiResponse::ok_msg("pixa identify utility"))
            },

            // Fallback
            _ => {
                Response::json(&ApiResponse::err("Not found")).with_status_code(404)
            }
        );

        // Add CORS headers to response
        response.with_additional_header("Access-Control-Allow-Origin", "*")
    }

    fn get_controllers(state: &Arc<ServerState>) -> Response {
        let infos: Vec<ControllerInfo> = state
            .controllers
            .iter()
            .map(|c| ControllerInfo::of(c.as_ref()))
            .collect();
        Response::json(&infos)
    }

    fn get_status(state: &Arc<ServerState>) -> Response {
        let mut slot = state.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.refresh();
        let status = match (&slot.job, &slot.last) {
            (Some(job), _) => StatusResponse {
                busy: true,
                finished: job.finished(),
                total: job.total(),
                failures: Vec::new(),
            },
            (None, Some(done)) => StatusResponse {
                busy: false,
                finished: done.total,
                total: done.total,
                failures: done.failures.clone(),
            },
            (None, None) => StatusResponse {
                busy: false,
                finished: 0,
                total: 0,
                failures: Vec::new(),
            },
        };
        Response::json(&status)
    }

    fn post_identify(request: &Request, state: &Arc<ServerState>) -> Response {
        let body: IdentifyRequest = match rouille::input::json_input(request) {
            Ok(body) => body,
            Err(e) => {
                return Response::json(&ApiResponse::err(&format!("Invalid JSON: {}", e)))
                    .with_status_code(400);
            }
        };

        let mut slot = state.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.refresh();
        if slot.job.is_some() {
            return Response::json(&ApiResponse::err("Identify already in progress"))
                .with_status_code(409);
        }

        let selection = Selection::parse(&body.selection);
        match IdentifyJob::spawn(&selection, &state.controllers) {
            Ok(job) => {
                let total = job.total();
                slot.job = Some(job);
                slot.last = None;
                Response::json(&ApiResponse::ok_msg(&format!(
                    "Identifying {} controller(s)",
                    total
                )))
            }
            Err(IdentifyError::UnknownController(name)) => {
                Response::json(&ApiResponse::err(&format!("Unknown controller: {}", name)))
                    .with_status_code(404)
            }
            Err(IdentifyError::NoControllers) => {
                Response::json(&ApiResponse::err("No controllers attached"))
                    .with_status_code(503)
            }
        }
    }
}
