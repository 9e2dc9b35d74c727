#![forbid(unsafe_code)]

//! The dimming overlay and the info panel.
//!
//! [`PanelDom`] owns the two injected elements that live for the whole
//! tour: the full-page overlay (`#wm-overlay`) and the info panel
//! (`#wm-panel` with heading, body, and navigation controls). Per-step
//! state (content, control enabled-state, float coordinates) is applied
//! to these elements in place; the highlight clone is managed separately
//! because it is replaced on every step.

use web_sys::{Element, Event, HtmlElement};

use wasm_bindgen::JsCast;
use waymark_core::{Controls, Direction, PanelPlacement, Size, TourConfig, TourError};

use crate::content;
use crate::dom::{self, px};
use crate::naming;

/// Handles to the injected overlay and panel elements.
#[derive(Debug, Clone)]
pub struct PanelDom {
    overlay: Element,
    panel: HtmlElement,
    title: Element,
    body: Element,
    back: Option<Element>,
}

impl PanelDom {
    /// Create and attach the overlay and panel for one tour invocation.
    ///
    /// The back control is omitted entirely in singular mode; the forward
    /// control doubles as the dismiss control there.
    pub fn create(config: &TourConfig) -> Result<Self, TourError> {
        let document = dom::document()?;
        let page_body = dom::body()?;
        let singular = config.singular.is_some();

        let create = |tag: &str| {
            document
                .create_element(tag)
                .map_err(|err| dom::js_err(tag, err))
        };

        let overlay = create("div")?;
        overlay.set_id(naming::OVERLAY_ID);

        let panel = create("aside")?;
        panel.set_id(naming::PANEL_ID);
        panel
            .class_list()
            .add_1(naming::mode_class(config.mode))
            .map_err(|err| dom::js_err("panel mode class", err))?;

        let back = if singular {
            None
        } else {
            let back = create("a")?;
            back.set_class_name(&format!(
                "{} {} {}",
                naming::CONTROL_CLASS,
                naming::BACK_CLASS,
                naming::DISABLED_CLASS
            ));
            back.set_text_content(Some(content::DEFAULT_BACK_LABEL));
            panel
                .append_child(&back)
                .map_err(|err| dom::js_err("appendChild(back)", err))?;
            Some(back)
        };

        let title = create("h3")?;
        title.set_class_name(naming::TITLE_CLASS);
        panel
            .append_child(&title)
            .map_err(|err| dom::js_err("appendChild(title)", err))?;

        let body = create("p")?;
        body.set_class_name(naming::BODY_CLASS);
        panel
            .append_child(&body)
            .map_err(|err| dom::js_err("appendChild(body)", err))?;

        let next = create("a")?;
        next.set_class_name(&format!(
            "{} {}",
            naming::CONTROL_CLASS,
            naming::NEXT_CLASS
        ));
        next.set_text_content(Some(content::next_label(
            singular,
            config.confirm_label.as_deref(),
        )));
        panel
            .append_child(&next)
            .map_err(|err| dom::js_err("appendChild(next)", err))?;

        // Attach only once the whole structure is built, so a failure above
        // leaves zero injected DOM behind.
        page_body
            .append_child(&overlay)
            .map_err(|err| dom::js_err("appendChild(overlay)", err))?;
        if let Err(err) = page_body.append_child(&panel) {
            overlay.remove();
            return Err(dom::js_err("appendChild(panel)", err));
        }
        let panel: HtmlElement = panel
            .dyn_into()
            .map_err(|_| TourError::Dom("panel is not an html element".into()))?;

        Ok(Self {
            overlay,
            panel,
            title,
            body,
            back,
        })
    }

    /// The panel element (navigation clicks are delegated to it).
    #[must_use]
    pub fn panel(&self) -> &HtmlElement {
        &self.panel
    }

    /// Fill the heading and body copy for a step. The body is injected as
    /// HTML because step text may carry simple inline markup.
    pub fn set_content(&self, title: &str, text: &str) {
        self.title.set_text_content(Some(title));
        self.body.set_inner_html(text);
    }

    /// Apply the control enabled-state after a successful render.
    pub fn update_controls(&self, controls: Controls) -> Result<(), TourError> {
        if let Some(back) = &self.back {
            let list = back.class_list();
            if controls.back_enabled {
                list.remove_1(naming::DISABLED_CLASS)
                    .map_err(|err| dom::js_err("back enable", err))?;
            } else {
                list.add_1(naming::DISABLED_CLASS)
                    .map_err(|err| dom::js_err("back disable", err))?;
            }
        }
        Ok(())
    }

    /// Measured panel size for placement computations.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(
            f64::from(self.panel.offset_width()),
            f64::from(self.panel.offset_height()),
        )
    }

    /// Position the panel for a float-mode placement. The placement is in
    /// viewport space; inline coordinates are absolute in document space.
    pub fn apply_float(&self, placement: PanelPlacement) -> Result<(), TourError> {
        let (scroll_x, scroll_y) = dom::scroll_offset()?;
        let panel: &Element = self.panel.as_ref();
        dom::set_style(panel, "position", "absolute")?;
        dom::set_style(panel, "left", &px(placement.x + scroll_x))?;
        dom::set_style(panel, "top", &px(placement.y + scroll_y))?;
        Ok(())
    }

    /// Reset inline positioning for floor mode; the stylesheet pins the
    /// panel via the `wm-mode-floor` class.
    pub fn apply_floor(&self) -> Result<(), TourError> {
        let panel: &Element = self.panel.as_ref();
        dom::clear_style(panel, "position")?;
        dom::clear_style(panel, "left")?;
        dom::clear_style(panel, "top")?;
        Ok(())
    }

    /// Detach the overlay and panel from the document.
    pub fn remove(&self) {
        self.overlay.remove();
        self.panel.remove();
    }
}

/// Map a click event to a navigation action, honoring disabled state.
#[must_use]
pub fn nav_direction(event: &Event) -> Option<Direction> {
    let control = dom::control_from_event(event)?;
    if control.class_list().contains(naming::NEXT_CLASS) {
        Some(Direction::Forward)
    } else if control.class_list().contains(naming::BACK_CLASS) {
        Some(Direction::Backward)
    } else {
        None
    }
}
