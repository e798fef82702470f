//! Input controller: the widget's event entry point.
//!
//! `InputController` wires host events to ranking, rendering and selection.
//! Every event is handled to completion before the next one arrives, so a
//! typing event's rank, render and selection reset are always finished before
//! any navigation event looks at the list.

use crate::host::{Host, Key, WidgetEvent};
use crate::render::{default_item_factory, DropdownRenderer, ItemFactory, ListItem};
use crate::selection::{HighlightChange, SelectionState, SelectionStateMachine};
use misplete_core::{
    validate_all, Candidate, Config, DefaultScorer, EditDistanceScorer, MemoizedScorer, Ranking,
    RankingEngine, Result, ScoredCandidate, Scorer,
};
use tracing::{debug, warn};

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// The widget consumed the event; the host should suppress its default
    /// action (caret movement on Up/Down, focus change on pointer down)
    Handled,
    /// A suggestion was written into the text field
    Committed(String),
    /// The widget ignored the event
    NotHandled,
}

type MakeScorer<S> = Box<dyn FnOnce(&Config) -> S>;

/// Construction-time options for an `InputController`.
pub struct ControllerBuilder<H, S = DefaultScorer> {
    host: H,
    options: Vec<Candidate>,
    make_scorer: MakeScorer<S>,
    item_factory: Option<ItemFactory>,
    config: Config,
}

impl<H: Host, S: Scorer> ControllerBuilder<H, S> {
    /// Replace the built-in scorer.
    pub fn score_fn<S2: Scorer + 'static>(self, scorer: S2) -> ControllerBuilder<H, S2> {
        ControllerBuilder {
            host: self.host,
            options: self.options,
            make_scorer: Box::new(move |_| scorer),
            item_factory: self.item_factory,
            config: self.config,
        }
    }

    /// Replace the built-in per-item factory.
    pub fn list_item_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn(&ScoredCandidate, usize) -> Option<String> + 'static,
    {
        self.item_factory = Some(Box::new(factory));
        self
    }

    /// Render cap and cache size.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validate the options and build the controller.
    pub fn build(self) -> Result<InputController<H, S>> {
        let engine = RankingEngine::new((self.make_scorer)(&self.config));
        InputController::assemble(self.host, self.options, engine, self.item_factory, self.config)
    }
}

/// Autocomplete controller bound to one text field.
pub struct InputController<H: Host, S = DefaultScorer> {
    host: H,
    options: Vec<Candidate>,
    engine: RankingEngine<S>,
    item_factory: ItemFactory,
    renderer: DropdownRenderer<H::Container>,
    selection: SelectionStateMachine,
    ranking: Ranking,
    config: Config,
}

impl<H: Host> InputController<H, DefaultScorer> {
    /// Start configuring a controller for `host` over `options`.
    pub fn builder(host: H, options: Vec<Candidate>) -> ControllerBuilder<H, DefaultScorer> {
        ControllerBuilder {
            host,
            options,
            make_scorer: Box::new(|config: &Config| {
                MemoizedScorer::with_capacity(EditDistanceScorer::new(), config.max_cache_size)
            }),
            item_factory: None,
            config: Config::default(),
        }
    }

    /// Controller with every default: memoized edit distance scorer and an
    /// item cap of 8.
    pub fn new(host: H, options: Vec<Candidate>) -> Result<Self> {
        Self::builder(host, options).build()
    }
}

impl<H: Host, S: Scorer> InputController<H, S> {
    fn assemble(
        host: H,
        options: Vec<Candidate>,
        engine: RankingEngine<S>,
        item_factory: Option<ItemFactory>,
        config: Config,
    ) -> Result<Self> {
        validate_all(&options)?;
        let item_factory = item_factory.unwrap_or_else(|| default_item_factory(config.max_items));

        Ok(Self {
            host,
            options,
            engine,
            item_factory,
            renderer: DropdownRenderer::new(),
            selection: SelectionStateMachine::new(),
            ranking: Ranking::new(),
            config,
        })
    }

    /// Handle one host event.
    ///
    /// Only `Input` can fail. When it does, the previous dropdown, ranking
    /// and selection are left exactly as they were.
    pub fn handle_event(&mut self, event: WidgetEvent) -> Result<EventResult> {
        let result = match event {
            WidgetEvent::Input => self.refresh()?,
            WidgetEvent::KeyDown(key) => self.key_down(key),
            WidgetEvent::Blur => self.blur(),
            WidgetEvent::PointerOver { item: Some(index) } if self.renderer.is_visible() => {
                let change = self.selection.hover(index);
                self.apply(change);
                EventResult::Handled
            }
            WidgetEvent::PointerLeave if self.renderer.is_visible() => {
                let change = self.selection.leave();
                self.apply(change);
                EventResult::Handled
            }
            // Keeps focus in the text field while clicking a suggestion
            WidgetEvent::PointerDown if self.renderer.is_visible() => EventResult::Handled,
            WidgetEvent::Click { item: Some(_) } if self.renderer.is_visible() => self.commit(),
            _ => EventResult::NotHandled,
        };
        Ok(result)
    }

    /// Re-rank against the field's current value and rebuild the dropdown.
    pub fn refresh(&mut self) -> Result<EventResult> {
        let query = self.host.input_value();
        let ranking = match self.engine.rank(&query, &self.options) {
            Ok(ranking) => ranking,
            Err(err) => {
                warn!(query = %query, error = %err, "ranking failed; keeping previous suggestions");
                return Err(err);
            }
        };

        self.ranking = ranking;
        let shown = self
            .renderer
            .render(&self.ranking, &self.item_factory, &mut self.host);
        self.selection.rebuild(shown);
        Ok(EventResult::Handled)
    }

    fn key_down(&mut self, key: Key) -> EventResult {
        if !self.renderer.is_visible() {
            return EventResult::NotHandled;
        }

        match key {
            Key::Enter => self.commit(),
            Key::Escape => {
                self.close();
                EventResult::Handled
            }
            Key::Down => {
                let change = self.selection.down();
                self.apply(change);
                EventResult::Handled
            }
            Key::Up => {
                let change = self.selection.up();
                self.apply(change);
                EventResult::Handled
            }
            Key::Other => EventResult::NotHandled,
        }
    }

    fn blur(&mut self) -> EventResult {
        let was_visible = self.renderer.remove(&mut self.host);
        self.selection.blur();
        if was_visible {
            EventResult::Handled
        } else {
            EventResult::NotHandled
        }
    }

    /// Write the highlighted suggestion into the field and close. Does
    /// nothing when no suggestion is highlighted.
    fn commit(&mut self) -> EventResult {
        let Some(value) = self
            .selection
            .highlighted()
            .and_then(|index| self.ranking.get(index))
            .map(|scored| scored.display_value.clone())
        else {
            return EventResult::Handled;
        };

        self.selection.commit();
        self.host.set_input_value(&value);
        self.renderer.remove(&mut self.host);
        debug!(value = %value, "committed suggestion");
        EventResult::Committed(value)
    }

    fn close(&mut self) {
        self.renderer.remove(&mut self.host);
        self.selection.escape();
    }

    fn apply(&mut self, change: Option<HighlightChange>) {
        if let Some(change) = change {
            self.renderer.apply(&mut self.host, change);
        }
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_open()
    }

    /// Ranking behind the visible dropdown.
    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    /// Items of the visible dropdown.
    pub fn items(&self) -> &[ListItem] {
        self.renderer.items()
    }

    pub fn options(&self) -> &[Candidate] {
        &self.options
    }

    pub fn engine(&self) -> &RankingEngine<S> {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
