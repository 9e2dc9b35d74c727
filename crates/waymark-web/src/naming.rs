#![forbid(unsafe_code)]

//! The produced-DOM naming contract.
//!
//! Every element Waymark injects carries a stable `wm-` id or class so an
//! external stylesheet can theme the tour without touching this crate.
//! Nothing here may change without being treated as a breaking change to
//! that stylesheet contract.

use waymark_core::PlacementMode;

/// Full-page dimming overlay element id.
pub const OVERLAY_ID: &str = "wm-overlay";
/// Info panel element id.
pub const PANEL_ID: &str = "wm-panel";
/// Injected stylesheet element id.
pub const STYLE_ID: &str = "wm-style";

/// Info panel heading class.
pub const TITLE_CLASS: &str = "wm-title";
/// Info panel body class.
pub const BODY_CLASS: &str = "wm-body";
/// Navigation control class (both directions).
pub const CONTROL_CLASS: &str = "wm-control";
/// Back control class.
pub const BACK_CLASS: &str = "wm-back";
/// Forward/dismiss control class.
pub const NEXT_CLASS: &str = "wm-next";
/// Disabled-control marker class; disabled controls ignore clicks.
pub const DISABLED_CLASS: &str = "wm-disabled";

/// Class carried by the highlight clone (its only identifying hook).
pub const HIGHLIGHT_CLASS: &str = "wm-highlight";

/// Page-root marker while a tour is running.
pub const TOUR_MODE_CLASS: &str = "wm-tour-mode";
/// Page-root marker for singular (single-step) tours.
pub const SINGULAR_CLASS: &str = "wm-singular";

/// Selector used to map panel clicks back to a navigation control.
pub const CONTROL_SELECTOR: &str = "a.wm-control";

/// Page-root marker for the active placement mode.
#[must_use]
pub const fn mode_class(mode: PlacementMode) -> &'static str {
    match mode {
        PlacementMode::Float => "wm-mode-float",
        PlacementMode::Floor => "wm-mode-floor",
    }
}

/// The classes tagged onto the page root while a tour runs, so surrounding
/// styling can react (overlay dimming, z-index elevation).
#[must_use]
pub fn body_marker_classes(mode: PlacementMode, singular: bool) -> Vec<&'static str> {
    let mut classes = vec![TOUR_MODE_CLASS, mode_class(mode)];
    if singular {
        classes.push(SINGULAR_CLASS);
    }
    classes
}
