#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! Options are resolved once at tour start, validated, and never change for
//! the lifetime of the invocation. String-valued options coming from the
//! host page are parsed here so that a value outside an enumerated set is
//! rejected before any DOM exists.

use crate::error::ConfigError;
use crate::logging::debug;
use crate::step::Step;

/// Highlight/panel layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Info panel floats adjacent to the target, on the side with the most
    /// free viewport space.
    #[default]
    Float,
    /// Target is scrolled to the top of the viewport; the panel sits in a
    /// fixed position.
    Floor,
}

impl PlacementMode {
    /// Parse a host-supplied mode string.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "float" => Ok(Self::Float),
            "floor" => Ok(Self::Floor),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }

    /// Canonical name, as used in DOM marker classes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Floor => "floor",
        }
    }
}

/// Where the page scrolls once the tour ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndTarget {
    /// Scroll to the top of the page.
    #[default]
    Top,
    /// Restore the scroll offset recorded when the tour started.
    Origin,
}

impl EndTarget {
    /// Parse a host-supplied end-target string.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "top" => Ok(Self::Top),
            "origin" => Ok(Self::Origin),
            other => Err(ConfigError::InvalidEndTarget(other.to_string())),
        }
    }

    /// The vertical scroll offset to restore, given the offset recorded at
    /// tour start.
    #[must_use]
    pub fn resolve(self, origin_scroll: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Origin => origin_scroll,
        }
    }
}

/// Confirmation prompt shown before the tour starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// A bare message.
    Text(String),
    /// A title plus body pair.
    Titled {
        /// Prompt heading.
        title: String,
        /// Prompt body.
        body: String,
    },
}

impl Prompt {
    /// Flatten to the single string a blocking confirm dialog can show.
    #[must_use]
    pub fn to_message(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Titled { title, body } => format!("{title}\n\n{body}"),
        }
    }
}

/// Where the step sequence comes from. Exactly one source; the options
/// layer rejects a configuration providing neither.
#[derive(Debug, Clone, PartialEq)]
pub enum StepSource {
    /// Steps passed inline by the host page.
    Inline(Vec<Step>),
    /// Steps fetched from a URI, cached per-source for the page session.
    Remote(String),
}

/// The full option set for one tour invocation.
///
/// Immutable after [`TourConfig::validate`] passes.
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    /// Step data source.
    pub steps: StepSource,
    /// URI of the tour stylesheet, fetched once per page session.
    pub style_source: String,
    /// Minimum viewport width; below it the tour silently does not start.
    pub min_width: Option<f64>,
    /// Layout strategy.
    pub mode: PlacementMode,
    /// Restrict the tour to the one step with this selector.
    pub singular: Option<String>,
    /// Confirmation prompt; declining aborts with no side effects.
    pub prompt: Option<Prompt>,
    /// Post-tour scroll behavior.
    pub end_target: EndTarget,
    /// Paragraphs shown after completion (suppressed in singular mode).
    pub end_messages: Vec<String>,
    /// Offer to replay the tour from step 0 in the end-of-tour message.
    pub replay_offer: bool,
    /// Label override for the singular-mode dismiss control.
    pub confirm_label: Option<String>,
}

impl TourConfig {
    /// Minimal valid configuration; callers fill in the rest.
    #[must_use]
    pub fn new(steps: StepSource, style_source: impl Into<String>) -> Self {
        Self {
            steps,
            style_source: style_source.into(),
            min_width: None,
            mode: PlacementMode::default(),
            singular: None,
            prompt: None,
            end_target: EndTarget::default(),
            end_messages: Vec::new(),
            replay_offer: false,
            confirm_label: None,
        }
    }

    /// Validate required options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.style_source.is_empty() {
            return Err(ConfigError::MissingStyles);
        }
        if let StepSource::Remote(uri) = &self.steps
            && uri.is_empty()
        {
            return Err(ConfigError::MissingSteps);
        }
        Ok(())
    }

    /// Whether the viewport is too narrow for the tour to start.
    ///
    /// This is the silent-skip gate, not an error.
    #[must_use]
    pub fn below_min_width(&self, viewport_width: f64) -> bool {
        match self.min_width {
            Some(min) if viewport_width < min => {
                debug!("viewport {viewport_width}px below minimum {min}px; tour skipped");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline_config() -> TourConfig {
        TourConfig::new(StepSource::Inline(Vec::new()), "/tour.css")
    }

    #[test]
    fn mode_parses_enumerated_set_only() {
        assert_eq!(PlacementMode::parse("float").unwrap(), PlacementMode::Float);
        assert_eq!(PlacementMode::parse("floor").unwrap(), PlacementMode::Floor);
        assert_eq!(
            PlacementMode::parse("hover").unwrap_err(),
            ConfigError::InvalidMode("hover".into())
        );
    }

    #[test]
    fn end_target_parses_and_resolves() {
        assert_eq!(EndTarget::parse("top").unwrap(), EndTarget::Top);
        assert_eq!(EndTarget::parse("origin").unwrap(), EndTarget::Origin);
        assert!(EndTarget::parse("bottom").is_err());

        assert_eq!(EndTarget::Top.resolve(431.0), 0.0);
        assert_eq!(EndTarget::Origin.resolve(431.0), 431.0);
    }

    #[test]
    fn default_mode_is_float() {
        assert_eq!(PlacementMode::default(), PlacementMode::Float);
    }

    #[test]
    fn validate_requires_style_source() {
        let mut config = inline_config();
        config.style_source.clear();
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingStyles);
    }

    #[test]
    fn validate_rejects_empty_remote_uri() {
        let config = TourConfig::new(StepSource::Remote(String::new()), "/tour.css");
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingSteps);
    }

    #[test]
    fn min_width_gate() {
        let mut config = inline_config();
        assert!(!config.below_min_width(300.0));
        config.min_width = Some(720.0);
        assert!(config.below_min_width(719.0));
        assert!(!config.below_min_width(720.0));
    }

    #[test]
    fn prompt_flattens_to_message() {
        assert_eq!(Prompt::Text("Take a tour?".into()).to_message(), "Take a tour?");
        let titled = Prompt::Titled {
            title: "Welcome".into(),
            body: "Shall we look around?".into(),
        };
        assert_eq!(titled.to_message(), "Welcome\n\nShall we look around?");
    }
}
