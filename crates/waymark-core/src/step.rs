#![forbid(unsafe_code)]

//! The tour step sequence.
//!
//! A [`Step`] pairs an element selector with explanatory copy. Steps arrive
//! either inline or as a fetched JSON array, are ordered, and never change
//! once loaded. [`StepList`] is the shared, immutable sequence handle; it is
//! cheap to clone so the session cache and a running tour can hold the same
//! data.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::TourError;
use crate::geometry::Edge;

/// One entry in the tour sequence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// CSS selector resolved against the live DOM at render time.
    pub selector: String,
    /// Heading shown in the info panel.
    pub title: String,
    /// Body copy; may contain simple inline markup.
    pub text: String,
    /// Pin the info panel to one side of the target instead of letting
    /// free-space selection pick the side.
    #[serde(default)]
    pub position: Option<Edge>,
}

/// An ordered, immutable sequence of steps.
#[derive(Debug, Clone)]
pub struct StepList {
    steps: Arc<[Step]>,
}

impl StepList {
    /// Parse a JSON array of step objects.
    pub fn from_json(json: &str) -> Result<Self, TourError> {
        let steps: Vec<Step> =
            serde_json::from_str(json).map_err(|err| TourError::Data(err.to_string()))?;
        Ok(Self::from(steps))
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Index of the first step whose selector equals `selector`.
    ///
    /// Used to resolve the singular-mode start index; an unmatched selector
    /// falls back to the start of the sequence at the caller.
    #[must_use]
    pub fn index_of(&self, selector: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.selector == selector)
    }

    /// Iterate over the steps in order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}

impl From<Vec<Step>> for StepList {
    fn from(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn step(selector: &str) -> Step {
        Step {
            selector: selector.into(),
            title: format!("title {selector}"),
            text: "body".into(),
            position: None,
        }
    }

    #[test]
    fn parses_json_array() {
        let json = r##"[
            {"selector": "#menu", "title": "The menu", "text": "Click <b>here</b>."},
            {"selector": ".cart", "title": "Your cart", "text": "Items.", "position": "left"}
        ]"##;
        let steps = StepList::from_json(json).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.get(0).unwrap().selector, "#menu");
        assert_eq!(steps.get(0).unwrap().position, None);
        assert_eq!(steps.get(1).unwrap().position, Some(Edge::Left));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = StepList::from_json("{\"not\": \"an array\"}").unwrap_err();
        assert!(matches!(err, TourError::Data(_)));
    }

    #[test]
    fn index_of_matches_first_occurrence() {
        let steps = StepList::from(vec![step("#a"), step("#b"), step("#b")]);
        assert_eq!(steps.index_of("#b"), Some(1));
        assert_eq!(steps.index_of("#missing"), None);
    }

    #[test]
    fn get_is_none_out_of_range() {
        let steps = StepList::from(vec![step("#a")]);
        assert!(steps.get(1).is_none());
        assert!(StepList::from(Vec::new()).is_empty());
    }
}
