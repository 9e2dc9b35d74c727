#![forbid(unsafe_code)]

//! JS options-object parsing.
//!
//! `startTour` receives a plain JS object; values are read by reflection
//! and folded into a validated [`TourConfig`]. Inline step data is carried
//! through JSON so the same serde schema covers both inline and fetched
//! steps.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use waymark_core::{
    ConfigError, EndTarget, PlacementMode, Prompt, Step, StepSource, TourConfig, TourError,
};

/// Parsed options: the immutable config plus JS-side hooks.
pub struct TourOptions {
    /// Validated tour configuration.
    pub config: TourConfig,
    /// Invoked after completion, always.
    pub on_end: Option<Function>,
}

/// Parse and validate the `startTour` options object.
pub fn parse(options: &JsValue) -> Result<TourOptions, TourError> {
    let steps = match (get(options, "data"), get_string(options, "dataUri")) {
        (Some(data), _) => StepSource::Inline(parse_inline_steps(&data)?),
        (None, Some(uri)) => StepSource::Remote(uri),
        (None, None) => return Err(ConfigError::MissingSteps.into()),
    };
    let style_source = get_string(options, "styleUri").ok_or(ConfigError::MissingStyles)?;

    let mut config = TourConfig::new(steps, style_source);
    config.min_width = get_f64(options, "minWidth");
    if let Some(mode) = get_string(options, "mode") {
        config.mode = PlacementMode::parse(&mode)?;
    }
    config.singular = get_string(options, "singular");
    config.prompt = parse_prompt(options);
    if let Some(target) = get_string(options, "endTarget") {
        config.end_target = EndTarget::parse(&target)?;
    }
    config.end_messages = parse_messages(get(options, "endMessages"));
    config.replay_offer = get_bool(options, "replayOffer").unwrap_or(false);
    config.confirm_label = get_string(options, "confirmLabel");
    config.validate()?;

    let on_end = get(options, "onEnd").and_then(|value| value.dyn_into::<Function>().ok());
    Ok(TourOptions { config, on_end })
}

/// Inline step data: any JS array of step objects, carried through JSON.
fn parse_inline_steps(data: &JsValue) -> Result<Vec<Step>, TourError> {
    let json = js_sys::JSON::stringify(data)
        .map_err(|_| TourError::Data("inline step data is not serializable".into()))?;
    let json: String = json.into();
    serde_json::from_str(&json).map_err(|err| TourError::Data(err.to_string()))
}

fn parse_prompt(options: &JsValue) -> Option<Prompt> {
    let value = get(options, "prompt")?;
    if let Some(text) = value.as_string() {
        return Some(Prompt::Text(text));
    }
    match (get_string(&value, "title"), get_string(&value, "body")) {
        (Some(title), Some(body)) => Some(Prompt::Titled { title, body }),
        (Some(only), None) | (None, Some(only)) => Some(Prompt::Text(only)),
        (None, None) => None,
    }
}

/// End-of-tour messages: a bare string or an array of strings.
fn parse_messages(value: Option<JsValue>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    if let Some(single) = value.as_string() {
        return vec![single];
    }
    match value.dyn_into::<js_sys::Array>() {
        Ok(array) => array.iter().filter_map(|entry| entry.as_string()).collect(),
        Err(_) => Vec::new(),
    }
}

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(obj, &JsValue::from_str(key)).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn get_string(obj: &JsValue, key: &str) -> Option<String> {
    get(obj, key)?.as_string()
}

fn get_f64(obj: &JsValue, key: &str) -> Option<f64> {
    get(obj, key)?.as_f64()
}

fn get_bool(obj: &JsValue, key: &str) -> Option<bool> {
    get(obj, key)?.as_bool()
}
