//! HTTP server for the device identify utility.
//!
//! # Purpose
//!
//! Serves a small control page plus a JSON API for finding out which
//! physical LED matrix is which: pick a controller (or All), it blinks.
//! Works from a browser on the same network or from curl/scripts.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────┐                 ┌────────────────────────┐
//! │  rouille worker threads   │  IdentifyJob    │  identify-<name>       │
//! │                           │ ── spawn ─────▶ │  worker threads        │
//! │  POST /api/identify       │                 │  (one per controller)  │
//! │  GET  /api/status ─ poll ─┼◀── channel ─────│  blocking identify()   │
//! └───────────────────────────┘   TaskReport    └────────────────────────┘
//!          │
//!          │  Mutex<JobSlot>  (running job handle + last results)
//! ```
//!
//! - **rouille** - sync HTTP server (simpler than async axum/tokio)
//! - **crossbeam channel** - task reports from identify threads
//! - the job handle is polled on demand by status reads; no background
//!   poller thread
//!
//! # Used by
//!
//! - `main.rs` - runs `ApiServer::serve()` for the `serve` subcommand
//!
//! # Endpoints
//!
//! | Method | Path               | Description                          |
//! |--------|--------------------|--------------------------------------|
//! | GET    | `/`                | Embedded control page                |
//! | GET    | `/api/controllers` | Attached controllers (name, desc)    |
//! | GET    | `/api/status`      | Identify progress and failures       |
//! | GET    | `/api/health`      | Health check                         |
//! | POST   | `/api/identify`    | Start identifying (JSON body:        |
//! |        |                    | `{"selection": "sim-0"}` or `"All"`) |

mod api;
mod page;

pub use api::{ApiServer, FailureEntry, ServerState, StatusResponse};
