//! misplete crate root
//!
//! A text-input autocomplete widget. Candidates are ranked by fuzzy
//! closeness to what the user typed, a bounded suggestion list is rendered
//! after the text field, and the user commits a suggestion with the keyboard
//! or the pointer.
//!
//! The widget is host-agnostic: the host delivers `WidgetEvent`s and
//! performs the primitive operations of the `Host` trait.
//!
//! ```
//! use misplete::{Candidate, EventResult, InputController, Key, MemoryHost, WidgetEvent};
//!
//! let options = vec![
//!     Candidate::new(["Canada", "CA"]),
//!     Candidate::new(["United States", "USA", "US"]),
//! ];
//! let mut widget = InputController::new(MemoryHost::new(), options).unwrap();
//!
//! widget.host_mut().type_text("usa");
//! widget.handle_event(WidgetEvent::Input).unwrap();
//! widget.handle_event(WidgetEvent::KeyDown(Key::Down)).unwrap();
//! let result = widget.handle_event(WidgetEvent::KeyDown(Key::Enter)).unwrap();
//!
//! assert_eq!(result, EventResult::Committed("United States".to_string()));
//! ```

pub mod controller;
pub mod host;
pub mod render;
pub mod selection;

pub use controller::{ControllerBuilder, EventResult, InputController};
pub use host::{Host, Key, MemoryContainer, MemoryHost, MemoryItem, WidgetEvent};
pub use render::{build_items, default_item_factory, DropdownRenderer, ItemFactory, ListItem};
pub use selection::{HighlightChange, SelectionState, SelectionStateMachine};

// Re-export the core types callers need to configure the widget.
pub use misplete_core::{
    Candidate, Config, EditDistanceScorer, Error, MemoizedScorer, Ranking, RankingEngine, Result,
    ScoreFn, ScoredCandidate, Scorer,
};
