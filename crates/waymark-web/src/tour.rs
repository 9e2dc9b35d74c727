#![forbid(unsafe_code)]

//! The tour controller.
//!
//! [`TourRun`] owns the cursor state, the injected DOM, and the navigation
//! wiring for one tour invocation. The JS entry point [`start_tour`]
//! validates options, runs the start gates (viewport width, confirmation
//! prompt), fetches styles and step data, claims the single active-tour
//! slot, and hands control to the run.
//!
//! Two deferred, fire-and-forget tasks are scheduled per render: a short
//! delay before tagging the page root (so the overlay's CSS transition
//! applies), and a post-layout delay before smooth-scrolling. Neither is
//! cancelled on navigation; a rapid double-click before they fire can
//! apply a stale scroll. That race is inherited behavior and is left as
//! documented.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use waymark_core::{
    Controls, Direction, PlacementMode, Resolution, StepList, StepSource, TargetStatus,
    TourConfig, TourError, TourState, float_panel_position, floor_raise,
};

use crate::panel::{self, PanelDom};
use crate::{content, dom, fetch, highlight, options, session};

/// Delay before tagging the page root, letting the overlay transition apply.
const MODE_CLASS_DELAY_MS: u32 = 1;
/// Delay before scroll-into-view, letting layout settle after a render.
const SCROLL_SETTLE_DELAY_MS: u32 = 50;

/// Why a tour is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    /// The cursor left the sequence (or singular mode finished its step).
    Completed,
    /// A newer tour invocation displaced this one.
    Displaced,
}

/// Start a page tour. JS entry point.
///
/// Resolves once the tour has started (or silently declined to start);
/// rejects on configuration or retrieval errors, with no tour DOM left
/// behind in either case.
#[wasm_bindgen(js_name = startTour)]
pub async fn start_tour(options: JsValue) -> Result<(), JsValue> {
    let options = options::parse(&options).map_err(reject)?;
    start(options).await.map_err(reject)
}

fn reject(err: TourError) -> JsValue {
    tracing::error!("{err}");
    JsValue::from_str(&err.to_string())
}

async fn start(options: options::TourOptions) -> Result<(), TourError> {
    let options::TourOptions { config, on_end } = options;

    // Start gates: viewport width (silent), then the confirmation prompt.
    if config.below_min_width(dom::body_width()?) {
        return Ok(());
    }
    if let Some(prompt) = &config.prompt
        && !dom::confirm(&prompt.to_message())?
    {
        debug!("confirmation declined; tour not started");
        return Ok(());
    }

    // Stylesheet: fetched and attached once per page session.
    if !session::styles_injected() {
        let css = fetch::fetch_text(&config.style_source).await?;
        dom::inject_style(&css)?;
        session::mark_styles_injected();
    }

    // Step data: inline, cached, or fetched then cached per source URI.
    let steps = match &config.steps {
        StepSource::Inline(steps) => StepList::from(steps.clone()),
        StepSource::Remote(uri) => match session::cached_steps(uri) {
            Some(cached) => cached,
            None => {
                let fetched = fetch::fetch_steps(uri).await?;
                session::cache_steps(uri, fetched.clone());
                fetched
            }
        },
    };

    // One active tour per page: a new start displaces the prior run.
    let (token, displaced) = session::begin();
    if displaced.is_some()
        && let Some(prior) = session::take_active_run()
    {
        prior.borrow_mut().terminate(EndReason::Displaced);
    }

    let start_index = config
        .singular
        .as_deref()
        .and_then(|selector| steps.index_of(selector))
        .unwrap_or(0);
    let (_, origin_scroll) = dom::scroll_offset()?;

    let panel_dom = match PanelDom::create(&config) {
        Ok(panel_dom) => panel_dom,
        Err(err) => {
            session::end(token);
            return Err(err);
        }
    };
    let run = Rc::new(RefCell::new(TourRun {
        state: TourState::new(start_index, origin_scroll),
        dom: Some(panel_dom),
        config,
        on_end,
        steps,
        token,
        highlight: None,
        raised: None,
        nav: None,
    }));
    session::set_active_run(token, run.clone());
    TourRun::wire_navigation(&run)?;

    let replay = run.borrow_mut().evaluate()?;
    if replay {
        TourRun::restart(&run)?;
    }
    Ok(())
}

/// One live tour invocation.
pub(crate) struct TourRun {
    config: TourConfig,
    on_end: Option<Function>,
    steps: StepList,
    state: TourState,
    token: u64,
    dom: Option<PanelDom>,
    highlight: Option<Element>,
    raised: Option<Element>,
    nav: Option<Closure<dyn FnMut(Event)>>,
}

impl TourRun {
    /// Delegate panel clicks to cursor movement.
    fn wire_navigation(run: &Rc<RefCell<TourRun>>) -> Result<(), TourError> {
        let weak: Weak<RefCell<TourRun>> = Rc::downgrade(run);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(run) = weak.upgrade() else {
                return;
            };
            let Some(direction) = panel::nav_direction(&event) else {
                return;
            };
            let replay = run.borrow_mut().advance(direction);
            match replay {
                Ok(true) => {
                    if let Err(err) = TourRun::restart(&run) {
                        warn!("replay failed: {err}");
                    }
                }
                Ok(false) => {}
                Err(err) => warn!("navigation failed: {err}"),
            }
        });

        let run_ref = run.borrow();
        let Some(panel_dom) = run_ref.dom.as_ref() else {
            return Ok(());
        };
        panel_dom
            .panel()
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|err| dom::js_err("addEventListener(click)", err))?;
        drop(run_ref);
        run.borrow_mut().nav = Some(closure);
        Ok(())
    }

    /// Move the cursor and re-evaluate. Returns `true` when the tour ended
    /// and the user accepted the replay offer.
    fn advance(&mut self, direction: Direction) -> Result<bool, TourError> {
        if !self.state.is_active() {
            return Ok(false);
        }
        self.state.advance(direction);
        self.evaluate()
    }

    /// Resolve the cursor to a renderable step (skipping unresolvable
    /// targets) and render it, or terminate. Returns `true` when the tour
    /// ended and the user accepted the replay offer.
    fn evaluate(&mut self) -> Result<bool, TourError> {
        let steps = self.steps.clone();
        let singular = self.config.singular.is_some();
        let resolution = self.state.resolve(steps.len(), singular, |index| {
            steps
                .get(index)
                .map(|step| dom::probe_target(&step.selector))
                .unwrap_or(TargetStatus::Missing)
        });
        match resolution {
            Resolution::Show(index) => {
                self.render_step(index)?;
                Ok(false)
            }
            Resolution::Finish => Ok(self.terminate(EndReason::Completed)),
        }
    }

    fn render_step(&mut self, index: usize) -> Result<(), TourError> {
        let step = self
            .steps
            .get(index)
            .cloned()
            .ok_or_else(|| TourError::Dom(format!("step {index} out of range")))?;
        let target = dom::resolve_target(&step.selector)?
            .ok_or_else(|| TourError::Dom(format!("target vanished: {}", step.selector)))?;
        debug!("rendering step {index} ({})", step.selector);

        // Replace the previous step's highlight and floor adjustment.
        if let Some(previous) = self.highlight.take() {
            previous.remove();
        }
        self.restore_raised();

        let clone = highlight::clone_over(&target)?;
        self.highlight = Some(clone);

        // Deferred so the overlay's CSS transition applies after insertion.
        let mode = self.config.mode;
        let singular = self.config.singular.is_some();
        Timeout::new(MODE_CLASS_DELAY_MS, move || {
            if let Err(err) = dom::add_body_markers(mode, singular) {
                warn!("body markers: {err}");
            }
        })
        .forget();

        let Some(panel_dom) = self.dom.as_ref() else {
            return Err(TourError::Dom("tour dom already removed".into()));
        };
        panel_dom.set_content(&step.title, &step.text);
        panel_dom.update_controls(Controls::for_index(index, singular))?;

        match self.config.mode {
            PlacementMode::Float => {
                let placement = float_panel_position(
                    dom::bounding_rect(&target),
                    dom::viewport_size()?,
                    panel_dom.size(),
                    step.position,
                );
                panel_dom.apply_float(placement)?;

                // Deferred so layout settles before the scroll.
                let panel: Element = panel_dom.panel().clone().into();
                Timeout::new(SCROLL_SETTLE_DELAY_MS, move || {
                    dom::smooth_scroll_center(&panel);
                })
                .forget();
            }
            PlacementMode::Floor => {
                panel_dom.apply_floor()?;
                if let Some(raise) =
                    floor_raise(dom::is_fixed_bottom(&target), panel_dom.size().height)
                {
                    dom::set_style(&target, "bottom", &dom::px(raise))?;
                    self.raised = Some(target.clone());
                }
                let target = target.clone();
                Timeout::new(SCROLL_SETTLE_DELAY_MS, move || {
                    dom::smooth_scroll_top(&target);
                })
                .forget();
            }
        }
        Ok(())
    }

    /// Tear down all injected DOM, restore scroll, release the active
    /// slot, and run the end-of-tour sequence. Returns `true` when the
    /// user accepted a replay offer.
    fn terminate(&mut self, reason: EndReason) -> bool {
        if let Some(panel_dom) = self.dom.take() {
            panel_dom.remove();
        }
        if let Some(previous) = self.highlight.take() {
            previous.remove();
        }
        self.restore_raised();
        self.nav = None;
        if let Err(err) = dom::remove_body_markers() {
            warn!("clearing body markers: {err}");
        }

        let offset = self.config.end_target.resolve(self.state.origin_scroll());
        if let Err(err) = dom::scroll_to(offset) {
            warn!("restoring scroll: {err}");
        }

        session::end(self.token);
        session::clear_active_run(self.token);

        if let Some(callback) = &self.on_end {
            let _ = callback.call0(&JsValue::NULL);
        }

        // End-of-tour message; singular tours and displaced runs skip it.
        if reason != EndReason::Completed
            || self.config.singular.is_some()
            || self.config.end_messages.is_empty()
        {
            return false;
        }
        let message = content::join_paragraphs(&self.config.end_messages);
        if self.config.replay_offer {
            dom::confirm(&content::replay_message(&message)).unwrap_or(false)
        } else {
            if let Err(err) = dom::alert(&message) {
                warn!("end message: {err}");
            }
            false
        }
    }

    /// Rebuild the tour DOM and re-run from step 0 after an accepted
    /// replay offer. The confirmation prompt is not shown again.
    fn restart(run: &Rc<RefCell<TourRun>>) -> Result<(), TourError> {
        let token = {
            let mut inner = run.borrow_mut();
            let (token, _) = session::begin();
            inner.token = token;
            inner.state.replay();
            match PanelDom::create(&inner.config) {
                Ok(panel_dom) => inner.dom = Some(panel_dom),
                Err(err) => {
                    session::end(token);
                    return Err(err);
                }
            }
            token
        };
        session::set_active_run(token, run.clone());
        TourRun::wire_navigation(run)?;
        let replay_again = run.borrow_mut().evaluate()?;
        if replay_again {
            // A zero-length sequence could end immediately with the offer
            // re-accepted; decline silently instead of looping.
            debug!("replay re-accepted on an immediately-ending tour; stopping");
        }
        Ok(())
    }

    /// Undo the floor-mode raise of a fixed bottom-anchored target.
    fn restore_raised(&mut self) {
        if let Some(previous) = self.raised.take()
            && let Err(err) = dom::clear_style(&previous, "bottom")
        {
            warn!("restoring raised target: {err}");
        }
    }
}
