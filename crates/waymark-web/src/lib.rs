#![forbid(unsafe_code)]

//! `waymark-web` binds the Waymark tour engine to the live DOM.
//!
//! The JS-facing surface is a single entry point, `startTour(options)`,
//! which validates the option set, optionally awaits a confirmation prompt,
//! fetches step data and the tour stylesheet (cached per page session), and
//! then walks the step sequence: for each step it clones the target element
//! as a purely presentational highlight, positions the info panel, and
//! wires the forward/back controls.
//!
//! Everything algorithmic (cursor movement, skip-walk over unresolvable
//! targets, free-space side selection, termination) lives in
//! [`waymark_core`]; this crate only resolves selectors, measures
//! rectangles, and mutates the DOM.
//!
//! The DOM contract (element ids/classes an external stylesheet can theme)
//! is defined in [`naming`] and is target-independent, as is the default
//! copy in [`content`]; both are unit-tested natively. The wasm-only
//! modules are compiled for `wasm32` targets.

pub mod content;
pub mod naming;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod fetch;
#[cfg(target_arch = "wasm32")]
pub mod highlight;
#[cfg(target_arch = "wasm32")]
pub mod options;
#[cfg(target_arch = "wasm32")]
pub mod panel;
#[cfg(target_arch = "wasm32")]
mod session;
#[cfg(target_arch = "wasm32")]
pub mod tour;

#[cfg(target_arch = "wasm32")]
pub use tour::start_tour;
