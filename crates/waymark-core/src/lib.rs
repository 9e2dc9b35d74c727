#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: tour cursor, placement geometry, and session model.
//!
//! # Role in Waymark
//! `waymark-core` is the engine layer. It owns the step data model, the
//! linear cursor that walks the step sequence (skipping unresolvable
//! targets), the float-mode placement math, and the process-wide session
//! state (data cache, style-injection flag, single active tour).
//!
//! # Primary responsibilities
//! - **Step / StepList**: the tour sequence, deserialized from inline data
//!   or a fetched JSON document.
//! - **TourConfig**: options resolved and validated once at tour start.
//! - **TourState**: the cursor state machine, including the bounded
//!   skip-walk over missing/hidden targets.
//! - **Placement**: free-space computation around a target rectangle and
//!   info-panel coordinates for the chosen side.
//! - **Session**: cache and single-active-tour bookkeeping.
//!
//! # How it fits in the system
//! The binding crate (`waymark-web`) resolves selectors against the live
//! DOM, probes visibility, and renders; everything it decides (where the
//! panel goes, which step shows next, when the tour ends) is computed
//! here. Nothing in this crate touches `web-sys`, so the whole engine is
//! testable on any target.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod session;
pub mod step;

mod logging;

pub use config::{EndTarget, PlacementMode, Prompt, StepSource, TourConfig};
pub use engine::{Controls, Direction, Resolution, TargetStatus, TourState};
pub use error::{ConfigError, TourError};
pub use geometry::{Edge, Rect, Size};
pub use placement::{
    FreeSpace, HIGHLIGHT_TOLERANCE, PANEL_GAP, PanelPlacement, choose_edge, float_panel_position,
    floor_raise, highlight_rect,
};
pub use session::Session;
pub use step::{Step, StepList};
