//! Highlight tracking for the suggestion list.
//!
//! `SelectionStateMachine` knows how many items are shown and which one, if
//! any, is highlighted. It never touches the host: each transition that moves
//! the highlight reports a `HighlightChange` for the renderer to apply to the
//! already-rendered items.
//!
//! Keyboard navigation passes through "nothing highlighted" at both ends:
//!
//! ```text
//! Down: none -> 0 -> 1 -> ... -> N-1 -> none
//! Up:   none -> N-1 -> ... -> 1 -> 0 -> none
//! ```

/// Selection state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No suggestion list is visible
    #[default]
    Closed,
    /// `len` items are visible; `highlighted` is `None` when nothing is highlighted
    Open {
        len: usize,
        highlighted: Option<usize>,
    },
}

/// Highlight movement produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// State machine for the highlighted suggestion.
#[derive(Debug, Clone, Default)]
pub struct SelectionStateMachine {
    state: SelectionState,
}

impl SelectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SelectionState::Open { .. })
    }

    /// The highlighted index, if any.
    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            SelectionState::Open { highlighted, .. } => highlighted,
            SelectionState::Closed => None,
        }
    }

    /// The highlighted index with -1 standing for "nothing highlighted".
    pub fn highlighted_index(&self) -> isize {
        self.highlighted()
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Number of visible items (0 when closed).
    pub fn len(&self) -> usize {
        match self.state {
            SelectionState::Open { len, .. } => len,
            SelectionState::Closed => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A new list of `len` items was rendered: open with nothing highlighted,
    /// or close when the list is empty.
    pub fn rebuild(&mut self, len: usize) {
        self.state = if len == 0 {
            SelectionState::Closed
        } else {
            SelectionState::Open {
                len,
                highlighted: None,
            }
        };
    }

    /// Request a new highlight. Ignored when closed or when `index` is not a
    /// valid item of the current list.
    pub fn change_highlighted(&mut self, index: Option<usize>) -> Option<HighlightChange> {
        let SelectionState::Open { len, highlighted } = self.state else {
            return None;
        };
        if index.is_some_and(|i| i >= len) {
            return None;
        }

        self.state = SelectionState::Open {
            len,
            highlighted: index,
        };
        Some(HighlightChange {
            previous: highlighted,
            current: index,
        })
    }

    /// Down arrow: next item, or nothing after the last one.
    pub fn down(&mut self) -> Option<HighlightChange> {
        let SelectionState::Open { len, highlighted } = self.state else {
            return None;
        };
        let next = match highlighted {
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) => None,
        };
        self.change_highlighted(next)
    }

    /// Up arrow: previous item, nothing before the first one, and the last
    /// item when nothing is highlighted.
    pub fn up(&mut self) -> Option<HighlightChange> {
        let SelectionState::Open { len, highlighted } = self.state else {
            return None;
        };
        let next = match highlighted {
            None => len.checked_sub(1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
        self.change_highlighted(next)
    }

    /// Pointer moved over item `index`.
    pub fn hover(&mut self, index: usize) -> Option<HighlightChange> {
        self.change_highlighted(Some(index))
    }

    /// Pointer left the list.
    pub fn leave(&mut self) -> Option<HighlightChange> {
        self.change_highlighted(None)
    }

    /// Escape: close from any state.
    pub fn escape(&mut self) {
        self.state = SelectionState::Closed;
    }

    /// Focus lost: close from any state, dropping the highlight.
    pub fn blur(&mut self) {
        self.state = SelectionState::Closed;
    }

    /// Commit the highlighted item.
    ///
    /// Returns the committed index and closes, or returns `None` and leaves
    /// the state untouched when nothing is highlighted.
    pub fn commit(&mut self) -> Option<usize> {
        let index = self.highlighted()?;
        self.state = SelectionState::Closed;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(len: usize, highlighted: Option<usize>) -> SelectionStateMachine {
        let mut machine = SelectionStateMachine::new();
        machine.rebuild(len);
        if highlighted.is_some() {
            machine.change_highlighted(highlighted);
        }
        machine
    }

    #[test]
    fn test_initial_state_is_closed() {
        let machine = SelectionStateMachine::new();
        assert_eq!(machine.state(), SelectionState::Closed);
        assert_eq!(machine.highlighted_index(), -1);
        assert!(machine.is_empty());
    }

    #[test]
    fn test_rebuild() {
        let mut machine = open(3, Some(2));
        machine.rebuild(5);
        assert_eq!(
            machine.state(),
            SelectionState::Open { len: 5, highlighted: None }
        );
        machine.rebuild(0);
        assert_eq!(machine.state(), SelectionState::Closed);
    }

    #[test]
    fn test_down_cycle_passes_through_none() {
        let mut machine = open(3, None);
        let mut seen = Vec::new();
        for _ in 0..5 {
            machine.down();
            seen.push(machine.highlighted_index());
        }
        assert_eq!(seen, vec![0, 1, 2, -1, 0]);
    }

    #[test]
    fn test_up_cycle_passes_through_none() {
        let mut machine = open(3, None);
        let mut seen = Vec::new();
        for _ in 0..5 {
            machine.up();
            seen.push(machine.highlighted_index());
        }
        assert_eq!(seen, vec![2, 1, 0, -1, 2]);
    }

    #[test]
    fn test_down_then_up_is_identity_inside_the_list() {
        for h in [None, Some(0), Some(1)] {
            let mut machine = open(3, h);
            machine.down();
            machine.up();
            assert_eq!(machine.highlighted(), h);
        }
    }

    #[test]
    fn test_down_then_up_from_last_item() {
        // N-1 -> none -> N-1
        let mut machine = open(3, Some(2));
        machine.down();
        assert_eq!(machine.highlighted(), None);
        machine.up();
        assert_eq!(machine.highlighted(), Some(2));
    }

    #[test]
    fn test_up_then_down_across_the_boundary_is_not_identity() {
        // none -> N-1 -> none
        let mut machine = open(3, None);
        machine.up();
        machine.down();
        assert_eq!(machine.highlighted(), None);

        // 0 -> none -> 0
        let mut machine = open(3, Some(0));
        machine.up();
        assert_eq!(machine.highlighted(), None);
        machine.down();
        assert_eq!(machine.highlighted(), Some(0));
    }

    #[test]
    fn test_single_item_list() {
        let mut machine = open(1, None);
        machine.down();
        assert_eq!(machine.highlighted(), Some(0));
        machine.down();
        assert_eq!(machine.highlighted(), None);
        machine.up();
        assert_eq!(machine.highlighted(), Some(0));
    }

    #[test]
    fn test_out_of_range_highlight_is_ignored() {
        let mut machine = open(3, Some(1));
        assert_eq!(machine.change_highlighted(Some(3)), None);
        assert_eq!(machine.change_highlighted(Some(usize::MAX)), None);
        assert_eq!(machine.hover(7), None);
        assert_eq!(machine.highlighted(), Some(1));
    }

    #[test]
    fn test_highlight_ignored_when_closed() {
        let mut machine = SelectionStateMachine::new();
        assert_eq!(machine.change_highlighted(Some(0)), None);
        assert_eq!(machine.down(), None);
        assert_eq!(machine.up(), None);
        assert_eq!(machine.state(), SelectionState::Closed);
    }

    #[test]
    fn test_changes_report_previous_and_current() {
        let mut machine = open(3, None);
        assert_eq!(
            machine.hover(2),
            Some(HighlightChange { previous: None, current: Some(2) })
        );
        assert_eq!(
            machine.leave(),
            Some(HighlightChange { previous: Some(2), current: None })
        );
    }

    #[test]
    fn test_commit_with_highlight_closes() {
        let mut machine = open(4, Some(3));
        assert_eq!(machine.commit(), Some(3));
        assert_eq!(machine.state(), SelectionState::Closed);
    }

    #[test]
    fn test_commit_without_highlight_is_noop() {
        let mut machine = open(4, None);
        assert_eq!(machine.commit(), None);
        assert_eq!(
            machine.state(),
            SelectionState::Open { len: 4, highlighted: None }
        );
    }

    #[test]
    fn test_escape_and_blur_close() {
        let mut machine = open(2, Some(0));
        machine.escape();
        assert_eq!(machine.state(), SelectionState::Closed);

        let mut machine = open(2, Some(1));
        machine.blur();
        assert_eq!(machine.state(), SelectionState::Closed);
        assert_eq!(machine.highlighted_index(), -1);
    }
}
