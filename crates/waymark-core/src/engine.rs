#![forbid(unsafe_code)]

//! The tour cursor state machine.
//!
//! [`TourState`] owns the signed step cursor and drives every transition:
//! advancing or retreating by one, walking past steps whose targets are
//! missing or hidden, and deciding when the tour is over. The walk is an
//! explicit loop bounded by the sequence length: the cursor moves one step
//! per iteration in the active direction until a visible target is found or
//! the cursor leaves the valid range.
//!
//! The DOM is abstracted behind a probe callback: the binding layer reports
//! a [`TargetStatus`] per step index, and this module never sees a selector
//! or an element.

use crate::logging::debug;

/// Navigation direction of the most recent cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Toward higher indexes.
    #[default]
    Forward,
    /// Toward lower indexes.
    Backward,
}

impl Direction {
    /// Cursor delta for one movement in this direction.
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// What the DOM probe reports for one step's selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// At least one element matches and is visible.
    Visible,
    /// An element matches but is hidden via `display` or `visibility`.
    Hidden,
    /// No element matches the selector.
    Missing,
}

/// Outcome of resolving the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Render the step at this index.
    Show(usize),
    /// The tour is over; tear down.
    Finish,
}

/// Enabled/visible state of the navigation controls after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// The back control exists at all (hidden in singular mode).
    pub back_visible: bool,
    /// The back control accepts clicks; disabled exactly at index 0.
    pub back_enabled: bool,
}

impl Controls {
    /// Control state for a successfully rendered step.
    #[must_use]
    pub fn for_index(index: usize, singular: bool) -> Self {
        Self {
            back_visible: !singular,
            back_enabled: !singular && index > 0,
        }
    }
}

/// Mutable cursor state for one tour invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TourState {
    cursor: isize,
    direction: Direction,
    active: bool,
    rendered_any: bool,
    origin_scroll: f64,
}

impl TourState {
    /// Start a tour at `start_index`, recording the page's scroll offset so
    /// termination can restore it.
    #[must_use]
    pub fn new(start_index: usize, origin_scroll: f64) -> Self {
        Self {
            cursor: start_index as isize,
            direction: Direction::Forward,
            active: true,
            rendered_any: false,
            origin_scroll,
        }
    }

    /// The cursor as a valid index, if it is inside `[0, len)`.
    #[must_use]
    fn index_in_range(&self, len: usize) -> Option<usize> {
        (self.cursor >= 0 && (self.cursor as usize) < len).then_some(self.cursor as usize)
    }

    /// Current cursor position (may be out of range mid-transition).
    #[must_use]
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Direction of the most recent movement.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the tour is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Scroll offset recorded at tour start.
    #[must_use]
    pub fn origin_scroll(&self) -> f64 {
        self.origin_scroll
    }

    /// Move the cursor one step in `direction`.
    ///
    /// The cursor never skips more than one position per call; skipping
    /// unresolvable steps happens inside [`TourState::resolve`].
    pub fn advance(&mut self, direction: Direction) {
        self.direction = direction;
        self.cursor += direction.delta();
    }

    /// Resolve the cursor to a renderable step, walking past missing and
    /// hidden targets in the active direction.
    ///
    /// Returns [`Resolution::Finish`] (and deactivates the tour) when the
    /// cursor leaves `[0, len)`, or on a forward movement in singular mode
    /// once the one step has been shown. The walk visits each index at most
    /// once, so it terminates within `len` iterations even if every step is
    /// unresolvable.
    pub fn resolve(
        &mut self,
        len: usize,
        singular: bool,
        mut probe: impl FnMut(usize) -> TargetStatus,
    ) -> Resolution {
        if singular && self.rendered_any && self.direction == Direction::Forward {
            return self.finish();
        }

        loop {
            let Some(index) = self.index_in_range(len) else {
                return self.finish();
            };
            match probe(index) {
                TargetStatus::Visible => {
                    self.rendered_any = true;
                    return Resolution::Show(index);
                }
                TargetStatus::Hidden | TargetStatus::Missing => {
                    // A singular tour shows its one named step or nothing.
                    if singular && !self.rendered_any {
                        return self.finish();
                    }
                    debug!("step {index} target unresolved; skipping");
                    self.cursor += self.direction.delta();
                }
            }
        }
    }

    /// Reset for a replay from step 0. The origin scroll offset recorded at
    /// the original start is retained.
    pub fn replay(&mut self) {
        self.cursor = 0;
        self.direction = Direction::Forward;
        self.active = true;
        self.rendered_any = false;
    }

    fn finish(&mut self) -> Resolution {
        self.active = false;
        Resolution::Finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Probe that reports every step visible.
    fn all_visible(_: usize) -> TargetStatus {
        TargetStatus::Visible
    }

    /// Probe that reports every step missing, counting invocations.
    fn all_missing(count: &mut usize) -> impl FnMut(usize) -> TargetStatus + '_ {
        move |_| {
            *count += 1;
            TargetStatus::Missing
        }
    }

    // -- Range termination --

    #[test]
    fn out_of_range_forward_finishes() {
        let mut state = TourState::new(0, 0.0);
        assert_eq!(state.resolve(3, false, all_visible), Resolution::Show(0));
        state.advance(Direction::Forward);
        state.advance(Direction::Forward);
        assert_eq!(state.resolve(3, false, all_visible), Resolution::Show(2));
        state.advance(Direction::Forward);
        assert_eq!(state.resolve(3, false, all_visible), Resolution::Finish);
        assert!(!state.is_active());
    }

    #[test]
    fn out_of_range_backward_finishes() {
        let mut state = TourState::new(0, 0.0);
        assert_eq!(state.resolve(3, false, all_visible), Resolution::Show(0));
        state.advance(Direction::Backward);
        assert_eq!(state.resolve(3, false, all_visible), Resolution::Finish);
        assert!(!state.is_active());
    }

    #[test]
    fn empty_sequence_finishes_immediately() {
        let mut state = TourState::new(0, 0.0);
        assert_eq!(state.resolve(0, false, all_visible), Resolution::Finish);
    }

    // -- Skip walk --

    #[test]
    fn hidden_steps_are_skipped_forward() {
        let mut state = TourState::new(0, 0.0);
        let probe = |index: usize| {
            if index < 2 {
                TargetStatus::Hidden
            } else {
                TargetStatus::Visible
            }
        };
        assert_eq!(state.resolve(4, false, probe), Resolution::Show(2));
    }

    #[test]
    fn missing_steps_are_skipped_backward() {
        let mut state = TourState::new(3, 0.0);
        assert_eq!(state.resolve(4, false, all_visible), Resolution::Show(3));
        state.advance(Direction::Backward);
        let probe = |index: usize| {
            if index == 2 || index == 1 {
                TargetStatus::Missing
            } else {
                TargetStatus::Visible
            }
        };
        assert_eq!(state.resolve(4, false, probe), Resolution::Show(0));
    }

    #[test]
    fn all_invalid_terminates_within_len_probes() {
        let mut probes = 0;
        let mut state = TourState::new(0, 0.0);
        let outcome = state.resolve(5, false, all_missing(&mut probes));
        assert_eq!(outcome, Resolution::Finish);
        assert_eq!(probes, 5);
        assert!(!state.is_active());
    }

    #[test]
    fn skip_past_start_backward_terminates() {
        let mut state = TourState::new(2, 0.0);
        assert_eq!(state.resolve(3, false, all_visible), Resolution::Show(2));
        state.advance(Direction::Backward);
        let mut probes = 0;
        assert_eq!(
            state.resolve(3, false, all_missing(&mut probes)),
            Resolution::Finish
        );
        assert_eq!(probes, 2); // indexes 1 and 0
    }

    // -- Singular mode --

    #[test]
    fn singular_shows_once_then_finishes_forward() {
        let mut state = TourState::new(1, 0.0);
        assert_eq!(state.resolve(3, true, all_visible), Resolution::Show(1));
        state.advance(Direction::Forward);
        assert_eq!(state.resolve(3, true, all_visible), Resolution::Finish);
        assert!(!state.is_active());
    }

    #[test]
    fn singular_with_unresolvable_step_finishes_without_walking() {
        let mut probes = 0;
        let mut state = TourState::new(1, 0.0);
        let outcome = state.resolve(3, true, all_missing(&mut probes));
        assert_eq!(outcome, Resolution::Finish);
        assert_eq!(probes, 1);
    }

    // -- Controls --

    #[test]
    fn back_disabled_exactly_at_index_zero() {
        assert!(!Controls::for_index(0, false).back_enabled);
        assert!(Controls::for_index(1, false).back_enabled);
        assert!(Controls::for_index(7, false).back_enabled);
        assert!(Controls::for_index(0, false).back_visible);
    }

    #[test]
    fn singular_hides_back_control() {
        let controls = Controls::for_index(2, true);
        assert!(!controls.back_visible);
        assert!(!controls.back_enabled);
    }

    // -- Replay --

    #[test]
    fn replay_restores_step_zero_and_keeps_origin_scroll() {
        let mut state = TourState::new(0, 640.0);
        assert_eq!(state.resolve(2, false, all_visible), Resolution::Show(0));
        state.advance(Direction::Forward);
        assert_eq!(state.resolve(2, false, all_visible), Resolution::Show(1));
        state.advance(Direction::Forward);
        assert_eq!(state.resolve(2, false, all_visible), Resolution::Finish);

        state.replay();
        assert!(state.is_active());
        assert_eq!(state.origin_scroll(), 640.0);
        assert_eq!(state.resolve(2, false, all_visible), Resolution::Show(0));
    }

    #[test]
    fn advance_moves_cursor_by_exactly_one() {
        let mut state = TourState::new(4, 0.0);
        state.advance(Direction::Forward);
        assert_eq!(state.cursor(), 5);
        state.advance(Direction::Backward);
        state.advance(Direction::Backward);
        assert_eq!(state.cursor(), 3);
        assert_eq!(state.direction(), Direction::Backward);
    }
}
