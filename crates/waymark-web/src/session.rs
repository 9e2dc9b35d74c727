#![forbid(unsafe_code)]

//! Page-session singletons.
//!
//! WASM on the web is single-threaded, so the process-wide session state
//! from [`waymark_core::Session`] lives in a `thread_local`. Alongside it
//! sits the handle to the live tour run, kept so that a takeover start can
//! force-terminate the prior tour.

use std::cell::RefCell;
use std::rc::Rc;

use waymark_core::{Session, StepList};

use crate::tour::TourRun;

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::new());
    static ACTIVE_RUN: RefCell<Option<(u64, Rc<RefCell<TourRun>>)>> = const { RefCell::new(None) };
}

pub(crate) fn cached_steps(uri: &str) -> Option<StepList> {
    SESSION.with(|session| session.borrow().cached_steps(uri))
}

pub(crate) fn cache_steps(uri: &str, steps: StepList) {
    SESSION.with(|session| session.borrow_mut().cache_steps(uri, steps));
}

pub(crate) fn styles_injected() -> bool {
    SESSION.with(|session| session.borrow().styles_injected())
}

pub(crate) fn mark_styles_injected() {
    SESSION.with(|session| session.borrow_mut().mark_styles_injected());
}

/// Claim the active-tour slot; returns the new token and the displaced
/// prior token, if any.
pub(crate) fn begin() -> (u64, Option<u64>) {
    SESSION.with(|session| session.borrow_mut().begin())
}

/// Release the active-tour slot if `token` still owns it.
pub(crate) fn end(token: u64) {
    SESSION.with(|session| session.borrow_mut().end(token));
}

/// Store the live run for the tour holding `token`.
pub(crate) fn set_active_run(token: u64, run: Rc<RefCell<TourRun>>) {
    ACTIVE_RUN.with(|slot| *slot.borrow_mut() = Some((token, run)));
}

/// Take the live run out of the slot (displacement path).
pub(crate) fn take_active_run() -> Option<Rc<RefCell<TourRun>>> {
    ACTIVE_RUN.with(|slot| slot.borrow_mut().take().map(|(_, run)| run))
}

/// Drop the stored run if `token` still owns the slot. Stale tokens (from
/// a displaced tour) leave the successor's run in place.
pub(crate) fn clear_active_run(token: u64) {
    ACTIVE_RUN.with(|slot| {
        let mut slot = slot.borrow_mut();
        if matches!(&*slot, Some((owner, _)) if *owner == token) {
            *slot = None;
        }
    });
}
