#![forbid(unsafe_code)]

//! Thin DOM helpers over `web-sys`.
//!
//! Everything here converts between the live DOM and the engine's
//! vocabulary: selectors become [`TargetStatus`] probes, elements become
//! viewport [`Rect`]s, and JS exceptions become [`TourError::Dom`] values
//! stringified at the boundary.

use js_sys::Reflect;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use waymark_core::{PlacementMode, Rect, Size, TargetStatus, TourError};

use crate::naming;

/// The active window, or a `Dom` error outside a browser context.
pub fn window() -> Result<Window, TourError> {
    web_sys::window().ok_or_else(|| TourError::Dom("no window".into()))
}

/// The active document.
pub fn document() -> Result<Document, TourError> {
    window()?
        .document()
        .ok_or_else(|| TourError::Dom("no document".into()))
}

/// The document body.
pub fn body() -> Result<HtmlElement, TourError> {
    document()?
        .body()
        .ok_or_else(|| TourError::Dom("no body".into()))
}

/// Layout width of the document body, used for the minimum-width gate.
pub fn body_width() -> Result<f64, TourError> {
    Ok(f64::from(body()?.offset_width()))
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> Result<Size, TourError> {
    let window = window()?;
    let width = window
        .inner_width()
        .map_err(|err| js_err("innerWidth", err))?
        .as_f64()
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .map_err(|err| js_err("innerHeight", err))?
        .as_f64()
        .unwrap_or(0.0);
    Ok(Size::new(width, height))
}

/// Current page scroll offset `(x, y)`.
pub fn scroll_offset() -> Result<(f64, f64), TourError> {
    let window = window()?;
    let x = window.scroll_x().map_err(|err| js_err("scrollX", err))?;
    let y = window.scroll_y().map_err(|err| js_err("scrollY", err))?;
    Ok((x, y))
}

/// Scroll the page to a vertical offset (end-of-tour restore).
pub fn scroll_to(y: f64) -> Result<(), TourError> {
    window()?.scroll_to_with_x_and_y(0.0, y);
    Ok(())
}

/// Blocking confirmation dialog.
pub fn confirm(message: &str) -> Result<bool, TourError> {
    window()?
        .confirm_with_message(message)
        .map_err(|err| js_err("confirm", err))
}

/// Blocking alert dialog.
pub fn alert(message: &str) -> Result<(), TourError> {
    window()?
        .alert_with_message(message)
        .map_err(|err| js_err("alert", err))
}

/// First element matching `selector`, if any.
///
/// An invalid selector is reported as no match (the walk skips the step)
/// rather than an error.
pub fn resolve_target(selector: &str) -> Result<Option<Element>, TourError> {
    match document()?.query_selector(selector) {
        Ok(element) => Ok(element),
        Err(_) => {
            warn!("invalid selector `{selector}`; step skipped");
            Ok(None)
        }
    }
}

/// Probe a step's selector for the cursor walk.
pub fn probe_target(selector: &str) -> TargetStatus {
    match resolve_target(selector) {
        Ok(Some(element)) if is_visible(&element) => TargetStatus::Visible,
        Ok(Some(_)) => TargetStatus::Hidden,
        _ => TargetStatus::Missing,
    }
}

/// Whether an element is visible for tour purposes: not hidden via
/// `display` or `visibility`.
pub fn is_visible(element: &Element) -> bool {
    let Some(style) = computed_style(element) else {
        return true;
    };
    let display = style.get_property_value("display").unwrap_or_default();
    let visibility = style.get_property_value("visibility").unwrap_or_default();
    display != "none" && visibility != "hidden"
}

/// Whether an element is fixed-positioned and anchored to the viewport
/// bottom (the floor-mode case where the panel would cover it).
pub fn is_fixed_bottom(element: &Element) -> bool {
    let Some(style) = computed_style(element) else {
        return false;
    };
    let position = style.get_property_value("position").unwrap_or_default();
    let bottom = style.get_property_value("bottom").unwrap_or_default();
    position == "fixed" && bottom == "0px"
}

/// Viewport-space bounding rectangle of an element.
pub fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
}

/// Inject the fetched tour stylesheet into the document head.
pub fn inject_style(css: &str) -> Result<(), TourError> {
    let document = document()?;
    let style = document
        .create_element("style")
        .map_err(|err| js_err("createElement(style)", err))?;
    style.set_id(naming::STYLE_ID);
    style.set_text_content(Some(css));
    document
        .head()
        .ok_or_else(|| TourError::Dom("no head".into()))?
        .append_child(&style)
        .map_err(|err| js_err("appendChild(style)", err))?;
    Ok(())
}

/// Set one inline style property via reflection.
///
/// Avoids relying on web-sys `HtmlElement::style()` feature flags; set via
/// reflection on the `style` object instead.
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), TourError> {
    let style = Reflect::get(element.as_ref(), &JsValue::from_str("style"))
        .map_err(|err| js_err("style", err))?;
    Reflect::set(
        &style,
        &JsValue::from_str(property),
        &JsValue::from_str(value),
    )
    .map_err(|err| js_err(property, err))?;
    Ok(())
}

/// Clear an inline style property set earlier with [`set_style`].
pub fn clear_style(element: &Element, property: &str) -> Result<(), TourError> {
    set_style(element, property, "")
}

/// Format a pixel length for an inline style value.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Smooth-scroll an element into view, centered in the viewport.
pub fn smooth_scroll_center(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Smooth-scroll an element to the top of the viewport (floor mode).
pub fn smooth_scroll_top(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Tag the page root with the tour-mode marker classes.
pub fn add_body_markers(mode: PlacementMode, singular: bool) -> Result<(), TourError> {
    let body = body()?;
    for class in naming::body_marker_classes(mode, singular) {
        body.class_list()
            .add_1(class)
            .map_err(|err| js_err(class, err))?;
    }
    Ok(())
}

/// Remove every tour-mode marker class from the page root.
pub fn remove_body_markers() -> Result<(), TourError> {
    let body = body()?;
    for class in [
        naming::TOUR_MODE_CLASS,
        naming::mode_class(PlacementMode::Float),
        naming::mode_class(PlacementMode::Floor),
        naming::SINGULAR_CLASS,
    ] {
        body.class_list()
            .remove_1(class)
            .map_err(|err| js_err(class, err))?;
    }
    Ok(())
}

fn computed_style(element: &Element) -> Option<web_sys::CssStyleDeclaration> {
    web_sys::window()?.get_computed_style(element).ok().flatten()
}

/// Stringify a JS exception into a `Dom` error.
pub(crate) fn js_err(context: &str, value: JsValue) -> TourError {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"));
    TourError::Dom(format!("{context}: {detail}"))
}

/// Map a navigation click to the control element it landed on, skipping
/// disabled controls.
pub fn control_from_event(event: &web_sys::Event) -> Option<Element> {
    let target = event.target()?;
    let element: Element = target.dyn_into().ok()?;
    let control = element.closest(naming::CONTROL_SELECTOR).ok().flatten()?;
    if control.class_list().contains(naming::DISABLED_CLASS) {
        return None;
    }
    Some(control)
}
