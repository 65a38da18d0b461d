//! Recognition lifecycle controller
//!
//! Owns the single engine handle and keeps it listening across transient
//! errors.
//!
//! ## States
//!
//! ```text
//!  Uninitialized ──mount──► Starting ──ack──► Listening ──end──► Stopped
//!        ▲                     ▲   │              │                 │
//!        │                     │   │ error        │ error           │ timer
//!        │ start failed        │   ▼              ▼                 │
//!        └──────────────── Faulted(kind) ◄────────┘                 │
//!                              │   ▲──────────── timer ─────────────┘
//!                              │
//!              not-allowed ──► PermissionDenied ──user toggle──► Starting
//! ```
//!
//! `Unsupported` is entered at mount when no engine is available and is
//! never left.
//!
//! ## Restart timer
//!
//! At most one restart is pending at any instant: scheduling a restart
//! replaces the previous timer, and stop/dispose/permission denial clear it.
//!
//! ## Engine handles
//!
//! A natural end keeps the handle for the next run. An explicit stop or an
//! engine error drops it, so callbacks still in flight from that run carry a
//! stale generation and never reach the run that replaces it.

mod controller;
mod handle;
mod state;

pub use controller::RecognitionController;
pub use handle::{ControllerError, ControllerHandle};
pub use state::RecognitionState;

/// Title of the warning shown after a burst of aborts
pub const ABORT_WARNING_TITLE: &str = "Voice Recognition Issues";
/// Body of the warning shown after a burst of aborts
pub const ABORT_WARNING_MESSAGE: &str =
    "Speech recognition keeps stopping. Check your microphone or click the mic icon to restart.";
