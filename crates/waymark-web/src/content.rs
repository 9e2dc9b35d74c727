#![forbid(unsafe_code)]

//! Default copy for controls, prompts, and the end-of-tour message.

/// Back control glyph.
pub const DEFAULT_BACK_LABEL: &str = "\u{ab}"; // «
/// Forward control glyph.
pub const DEFAULT_NEXT_LABEL: &str = "\u{bb}"; // »
/// Dismiss label for singular-mode tours, unless overridden.
pub const DEFAULT_CONFIRM_LABEL: &str = "Got it";
/// Appended to the end-of-tour message when a replay is offered.
pub const REPLAY_OFFER: &str = "Watch again?";

/// Label of the forward control for this tour shape.
#[must_use]
pub fn next_label<'a>(singular: bool, confirm_label: Option<&'a str>) -> &'a str {
    if singular {
        confirm_label.unwrap_or(DEFAULT_CONFIRM_LABEL)
    } else {
        DEFAULT_NEXT_LABEL
    }
}

/// Join end-of-tour paragraphs for a blocking alert.
#[must_use]
pub fn join_paragraphs(messages: &[String]) -> String {
    messages.join("\n\n")
}

/// End-of-tour message with the replay offer appended, for a blocking
/// confirm where accepting restarts the tour.
#[must_use]
pub fn replay_message(joined: &str) -> String {
    if joined.is_empty() {
        REPLAY_OFFER.to_string()
    } else {
        format!("{joined}\n\n{REPLAY_OFFER}")
    }
}
