#![forbid(unsafe_code)]

//! Step-data and stylesheet retrieval.
//!
//! Failures here are not locally recovered: they map to
//! [`TourError::Data`] and reject the `startTour` promise before any tour
//! DOM exists. Caching (per source URI, per page session) is the session
//! module's concern, not this one's.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use waymark_core::{StepList, TourError};

use crate::dom;

/// Fetch a URI and return its body as text.
pub async fn fetch_text(uri: &str) -> Result<String, TourError> {
    let window = dom::window()?;
    let response = JsFuture::from(window.fetch_with_str(uri))
        .await
        .map_err(|err| data_err(uri, err))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| TourError::Data(format!("{uri}: fetch did not yield a response")))?;
    if !response.ok() {
        return Err(TourError::Data(format!("{uri}: HTTP {}", response.status())));
    }
    let body = JsFuture::from(response.text().map_err(|err| data_err(uri, err))?)
        .await
        .map_err(|err| data_err(uri, err))?;
    body.as_string()
        .ok_or_else(|| TourError::Data(format!("{uri}: response body is not text")))
}

/// Fetch and parse a JSON step document.
pub async fn fetch_steps(uri: &str) -> Result<StepList, TourError> {
    let json = fetch_text(uri).await?;
    StepList::from_json(&json)
}

fn data_err(uri: &str, value: JsValue) -> TourError {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"));
    TourError::Data(format!("{uri}: {detail}"))
}
