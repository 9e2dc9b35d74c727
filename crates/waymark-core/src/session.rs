#![forbid(unsafe_code)]

//! Process-wide session state.
//!
//! The original widget hid this state in ad-hoc globals; here it has an
//! explicit owner with an explicit lifecycle:
//!
//! - a step-data cache keyed by source URI, populated on first fetch and
//!   kept for the page session,
//! - a styles-injected flag so the stylesheet is fetched and attached once,
//! - a single-active-tour token: starting a tour while one is active
//!   displaces the prior tour, and the caller force-terminates it.
//!
//! Tokens are generation counters, so a stale `end` from an already
//! displaced tour cannot clear the slot of its successor.

use std::collections::HashMap;

use crate::logging::{debug, warn};
use crate::step::StepList;

/// Cache, style, and active-tour bookkeeping for one page session.
#[derive(Debug, Default)]
pub struct Session {
    data_cache: HashMap<String, StepList>,
    styles_injected: bool,
    active: Option<u64>,
    next_token: u64,
}

impl Session {
    /// Fresh session with nothing cached and no active tour.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached steps for a source URI, if previously fetched.
    #[must_use]
    pub fn cached_steps(&self, uri: &str) -> Option<StepList> {
        self.data_cache.get(uri).cloned()
    }

    /// Cache the steps fetched from `uri` for the rest of the page session.
    pub fn cache_steps(&mut self, uri: impl Into<String>, steps: StepList) {
        let uri = uri.into();
        debug!("caching {} steps for {uri}", steps.len());
        self.data_cache.insert(uri, steps);
    }

    /// Whether the tour stylesheet has already been injected.
    #[must_use]
    pub fn styles_injected(&self) -> bool {
        self.styles_injected
    }

    /// Record that the stylesheet is attached; later tours skip the fetch.
    pub fn mark_styles_injected(&mut self) {
        self.styles_injected = true;
    }

    /// Begin a tour: returns the new tour's token, plus the token of a
    /// prior active tour that this start displaces (the caller must
    /// force-terminate it).
    pub fn begin(&mut self) -> (u64, Option<u64>) {
        let token = self.next_token;
        self.next_token += 1;
        let displaced = self.active.replace(token);
        if let Some(prior) = displaced {
            warn!("tour {token} started while tour {prior} active; displacing it");
        }
        (token, displaced)
    }

    /// End the tour holding `token`. A stale token (from a tour that was
    /// already displaced) is ignored.
    pub fn end(&mut self, token: u64) {
        if self.active == Some(token) {
            self.active = None;
        }
    }

    /// Token of the currently active tour, if any.
    #[must_use]
    pub fn active(&self) -> Option<u64> {
        self.active
    }
}
