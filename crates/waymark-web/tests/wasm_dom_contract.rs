#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! Browser checks for the injected-DOM contract: probe semantics, the
//! highlight clone, panel structure, and the page-root markers.

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

use waymark_core::{Controls, PlacementMode, StepSource, TargetStatus, TourConfig};
use waymark_web::panel::PanelDom;
use waymark_web::{dom, highlight, naming};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    dom::document().expect("test runs in a browser")
}

/// Replace the body content for one test scenario.
fn install(html: &str) {
    document()
        .body()
        .expect("test page has a body")
        .set_inner_html(html);
}

fn inline_config() -> TourConfig {
    TourConfig::new(StepSource::Inline(Vec::new()), "/tour.css")
}

#[wasm_bindgen_test]
fn probe_classifies_targets() {
    install(
        r#"<div id="shown">visible</div>
           <div id="dnone" style="display: none">hidden</div>
           <div id="vhidden" style="visibility: hidden">hidden</div>"#,
    );

    assert_eq!(dom::probe_target("#shown"), TargetStatus::Visible);
    assert_eq!(dom::probe_target("#dnone"), TargetStatus::Hidden);
    assert_eq!(dom::probe_target("#vhidden"), TargetStatus::Hidden);
    assert_eq!(dom::probe_target("#absent"), TargetStatus::Missing);
    // An invalid selector is a skip, not a crash.
    assert_eq!(dom::probe_target("p::!!bad"), TargetStatus::Missing);
}

#[wasm_bindgen_test]
fn highlight_clone_is_presentational() {
    install(
        r#"<div id="hl-target" data-secret="s" name="orig"
                style="position: absolute; left: 10px; top: 20px; width: 100px; height: 50px">
               <span id="hl-inner" data-x="1">hi</span>
           </div>"#,
    );
    let target = document()
        .query_selector("#hl-target")
        .unwrap()
        .expect("target installed");

    let clone = highlight::clone_over(&target).unwrap();

    // Back-reference class is the clone's only identifying hook.
    assert!(clone.class_list().contains(naming::HIGHLIGHT_CLASS));
    assert!(clone.get_attribute("id").is_none());
    assert!(clone.get_attribute("name").is_none());
    assert!(clone.get_attribute("data-secret").is_none());
    // Descendants are stripped too.
    assert!(clone.query_selector("#hl-inner").unwrap().is_none());
    assert!(clone.query_selector("[data-x]").unwrap().is_none());

    // Pinned over the original with the 1px size tolerance.
    let style = clone.get_attribute("style").unwrap_or_default();
    assert!(style.contains("101px"), "style was: {style}");
    assert!(style.contains("51px"), "style was: {style}");

    // Attached to the document, findable only by the styling hook.
    let attached = document()
        .query_selector(&format!(".{}", naming::HIGHLIGHT_CLASS))
        .unwrap();
    assert!(attached.is_some());
    clone.remove();
}

#[wasm_bindgen_test]
fn panel_structure_matches_naming_contract() {
    install("");
    let panel = PanelDom::create(&inline_config()).unwrap();

    assert!(document().get_element_by_id(naming::OVERLAY_ID).is_some());
    assert!(document().get_element_by_id(naming::PANEL_ID).is_some());

    let back = document()
        .query_selector(&format!(".{}", naming::BACK_CLASS))
        .unwrap()
        .expect("multi-step tour has a back control");
    // Back starts disabled (index 0).
    assert!(back.class_list().contains(naming::DISABLED_CLASS));

    panel.set_content("Step title", "Body with <b>markup</b>");
    let title = document()
        .query_selector(&format!(".{}", naming::TITLE_CLASS))
        .unwrap()
        .unwrap();
    assert_eq!(title.text_content().unwrap(), "Step title");
    let body = document()
        .query_selector(&format!(".{}", naming::BODY_CLASS))
        .unwrap()
        .unwrap();
    assert!(body.inner_html().contains("<b>markup</b>"));

    // Enabled exactly when index > 0.
    panel.update_controls(Controls::for_index(2, false)).unwrap();
    assert!(!back.class_list().contains(naming::DISABLED_CLASS));
    panel.update_controls(Controls::for_index(0, false)).unwrap();
    assert!(back.class_list().contains(naming::DISABLED_CLASS));

    panel.remove();
    assert!(document().get_element_by_id(naming::OVERLAY_ID).is_none());
    assert!(document().get_element_by_id(naming::PANEL_ID).is_none());
}

#[wasm_bindgen_test]
fn singular_panel_has_dismiss_only() {
    install("");
    let mut config = inline_config();
    config.singular = Some("#one".into());
    config.confirm_label = Some("Done".into());
    let panel = PanelDom::create(&config).unwrap();

    assert!(
        document()
            .query_selector(&format!(".{}", naming::BACK_CLASS))
            .unwrap()
            .is_none()
    );
    let next = document()
        .query_selector(&format!(".{}", naming::NEXT_CLASS))
        .unwrap()
        .unwrap();
    assert_eq!(next.text_content().unwrap(), "Done");

    panel.remove();
}

#[wasm_bindgen_test]
fn body_markers_round_trip() {
    install("");
    dom::add_body_markers(PlacementMode::Floor, true).unwrap();
    let body = document().body().unwrap();
    assert!(body.class_list().contains(naming::TOUR_MODE_CLASS));
    assert!(body.class_list().contains("wm-mode-floor"));
    assert!(body.class_list().contains(naming::SINGULAR_CLASS));

    dom::remove_body_markers().unwrap();
    assert!(!body.class_list().contains(naming::TOUR_MODE_CLASS));
    assert!(!body.class_list().contains("wm-mode-floor"));
    assert!(!body.class_list().contains(naming::SINGULAR_CLASS));
}

#[wasm_bindgen_test]
fn style_injection_is_tagged() {
    let existing = document().get_element_by_id(naming::STYLE_ID);
    if let Some(existing) = existing {
        existing.remove();
    }
    dom::inject_style("#wm-overlay { opacity: 0.5; }").unwrap();
    let style = document()
        .get_element_by_id(naming::STYLE_ID)
        .expect("stylesheet attached to head");
    assert!(style.text_content().unwrap().contains("wm-overlay"));
    style.remove();
}
