//! Suggestion list rendering.
//!
//! `DropdownRenderer` turns a ranking into a bounded list of items and owns
//! the one visible suggestion container. The container is never patched in
//! place: every render removes the previous one and builds a fresh one.

use crate::host::Host;
use crate::selection::HighlightChange;
use misplete_core::ScoredCandidate;
use tracing::debug;

/// Per-item factory: returns the item's label, or `None` to stop the walk.
pub type ItemFactory = Box<dyn Fn(&ScoredCandidate, usize) -> Option<String>>;

/// Factory that labels items with their display value and stops once the
/// index exceeds `cap`.
///
/// The check is `index > cap`, so indices `0..=cap` are produced: a cap of 8
/// shows up to nine items.
pub fn default_item_factory(cap: usize) -> ItemFactory {
    Box::new(move |scored, index| {
        if index > cap {
            None
        } else {
            Some(scored.display_value.clone())
        }
    })
}

/// A rendered suggestion, tagged with its position at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub index: usize,
    pub text: String,
}

/// Walk `ranking` from the start, asking `factory` for each item until it
/// returns `None` or the ranking runs out.
pub fn build_items(ranking: &[ScoredCandidate], factory: &ItemFactory) -> Vec<ListItem> {
    ranking
        .iter()
        .enumerate()
        .map_while(|(index, scored)| factory(scored, index).map(|text| ListItem { index, text }))
        .collect()
}

struct Dropdown<C> {
    container: C,
    items: Vec<ListItem>,
}

/// Owner of the visible suggestion container.
pub struct DropdownRenderer<C> {
    dropdown: Option<Dropdown<C>>,
}

impl<C> DropdownRenderer<C> {
    pub fn new() -> Self {
        Self { dropdown: None }
    }

    /// Rebuild the dropdown for `ranking` and return the number of items shown.
    ///
    /// Any previous container is removed first. No container is attached
    /// when the walk yields no items.
    pub fn render<H>(&mut self, ranking: &[ScoredCandidate], factory: &ItemFactory, host: &mut H) -> usize
    where
        H: Host<Container = C>,
    {
        let items = build_items(ranking, factory);
        self.remove(host);

        if items.is_empty() {
            debug!(ranked = ranking.len(), "no suggestions to render");
            return 0;
        }

        let mut container = host.create_container();
        for item in &items {
            host.append_item(&mut container, item.index, &item.text);
        }
        host.attach_after_input(&mut container);

        let len = items.len();
        debug!(ranked = ranking.len(), shown = len, "rendered dropdown");
        self.dropdown = Some(Dropdown { container, items });
        len
    }

    /// Remove the visible container, if any. Returns whether one was removed.
    pub fn remove<H>(&mut self, host: &mut H) -> bool
    where
        H: Host<Container = C>,
    {
        match self.dropdown.take() {
            Some(dropdown) => {
                host.remove_container(dropdown.container);
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dropdown.is_some()
    }

    /// Number of items in the visible dropdown (0 when hidden).
    pub fn len(&self) -> usize {
        self.dropdown.as_ref().map_or(0, |d| d.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items of the visible dropdown.
    pub fn items(&self) -> &[ListItem] {
        match &self.dropdown {
            Some(dropdown) => &dropdown.items,
            None => &[],
        }
    }

    /// Set or clear the highlight marker on an already-rendered item.
    /// Out-of-range indices and a hidden dropdown are ignored.
    pub fn mark<H>(&mut self, host: &mut H, index: usize, highlighted: bool)
    where
        H: Host<Container = C>,
    {
        if let Some(dropdown) = self.dropdown.as_mut() {
            if index < dropdown.items.len() {
                host.set_highlight(&mut dropdown.container, index, highlighted);
            }
        }
    }

    /// Move the highlight marker as described by `change`.
    pub fn apply<H>(&mut self, host: &mut H, change: HighlightChange)
    where
        H: Host<Container = C>,
    {
        if let Some(previous) = change.previous {
            self.mark(host, previous, false);
        }
        if let Some(current) = change.current {
            self.mark(host, current, true);
        }
    }
}

impl<C> Default for DropdownRenderer<C> {
    fn default() -> Self {
        Self::new()
    }
}
