#![forbid(unsafe_code)]

//! The highlight clone.
//!
//! Highlighting works by deep-cloning the target element and absolutely
//! positioning the clone to overlay the original pixel-exactly, with a
//! one-pixel tolerance on width/height so sub-pixel layout rounding cannot
//! clip it. The clone is purely presentational: identifying attributes
//! (`id`, `name`, `data-*`) are stripped from it and all its descendants,
//! and the only hook it keeps is the `wm-highlight` class.

use wasm_bindgen::JsCast;
use web_sys::Element;

use waymark_core::{highlight_rect, TourError};

use crate::dom::{self, px};
use crate::naming;

/// Clone `target` and pin the clone over it in document coordinates.
///
/// Returns the attached clone so the controller can remove it before the
/// next render.
pub fn clone_over(target: &Element) -> Result<Element, TourError> {
    let rect = dom::bounding_rect(target);
    let (scroll_x, scroll_y) = dom::scroll_offset()?;
    let placed = highlight_rect(rect).translated(scroll_x, scroll_y);

    let node = target
        .clone_node_with_deep(true)
        .map_err(|err| dom::js_err("cloneNode", err))?;
    let clone: Element = node
        .dyn_into()
        .map_err(|_| TourError::Dom("clone is not an element".into()))?;

    strip_identity(&clone);
    clone
        .class_list()
        .add_1(naming::HIGHLIGHT_CLASS)
        .map_err(|err| dom::js_err(naming::HIGHLIGHT_CLASS, err))?;

    dom::set_style(&clone, "position", "absolute")?;
    dom::set_style(&clone, "left", &px(placed.x))?;
    dom::set_style(&clone, "top", &px(placed.y))?;
    dom::set_style(&clone, "width", &px(placed.width))?;
    dom::set_style(&clone, "height", &px(placed.height))?;
    dom::set_style(&clone, "margin", "0")?;

    dom::body()?
        .append_child(&clone)
        .map_err(|err| dom::js_err("appendChild(highlight)", err))?;
    Ok(clone)
}

/// Strip identifying attributes from an element and all its descendants.
fn strip_identity(root: &Element) {
    strip_attributes(root);
    if let Ok(descendants) = root.query_selector_all("*") {
        for index in 0..descendants.length() {
            if let Some(element) = descendants
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                strip_attributes(&element);
            }
        }
    }
}

fn strip_attributes(element: &Element) {
    for name in element.get_attribute_names().iter() {
        let Some(name) = name.as_string() else {
            continue;
        };
        if name == "id" || name == "name" || name.starts_with("data-") {
            let _ = element.remove_attribute(&name);
        }
    }
}
