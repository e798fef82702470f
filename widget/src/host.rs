//! Host environment interface.
//!
//! The widget never touches a real UI toolkit. Everything it needs from the
//! host is expressed here: the events the host delivers, and the primitive
//! operations the widget asks the host to perform. `MemoryHost` is a complete
//! in-memory implementation used by tests and the command-line tools.

/// Keys the widget reacts to while the dropdown is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Up,
    Down,
    /// Any other key; ignored by the widget
    Other,
}

/// Events delivered by the host, one at a time.
///
/// Pointer events carry the index tag of the rendered item under the pointer
/// (`None` when the target is the container itself, not an item).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The text field's value changed
    Input,
    /// A key was pressed in the text field
    KeyDown(Key),
    /// The text field lost focus
    Blur,
    /// The pointer moved over the suggestion container
    PointerOver { item: Option<usize> },
    /// The pointer left the suggestion container
    PointerLeave,
    /// A pointer button went down inside the suggestion container
    PointerDown,
    /// A click inside the suggestion container
    Click { item: Option<usize> },
}

/// Primitive operations the widget needs from the host environment.
pub trait Host {
    /// Handle to a suggestion container created by the host.
    type Container;

    /// Current value of the text field.
    fn input_value(&self) -> String;

    /// Replace the value of the text field.
    fn set_input_value(&mut self, value: &str);

    /// Create a new, detached, empty container.
    fn create_container(&mut self) -> Self::Container;

    /// Append an item showing `text`, tagged with `index`, to a container.
    fn append_item(&mut self, container: &mut Self::Container, index: usize, text: &str);

    /// Attach a container directly after the text field.
    fn attach_after_input(&mut self, container: &mut Self::Container);

    /// Detach and destroy a container.
    fn remove_container(&mut self, container: Self::Container);

    /// Set or clear the highlight marker on item `index` of a container.
    fn set_highlight(&mut self, container: &mut Self::Container, index: usize, highlighted: bool);
}

/// One row of a container rendered by `MemoryHost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItem {
    pub index: usize,
    pub text: String,
    pub highlighted: bool,
}

/// Container handle produced by `MemoryHost`.
#[derive(Debug)]
pub struct MemoryContainer {
    id: usize,
    items: Vec<MemoryItem>,
}

impl MemoryContainer {
    pub fn id(&self) -> usize {
        self.id
    }
}

/// In-memory host: a text field plus at most one attached container.
///
/// Data only, in the spirit of a platform context struct: after each event
/// the caller reads the fields to see what a real UI would show.
#[derive(Debug, Default)]
pub struct MemoryHost {
    value: String,
    attached: Option<(usize, Vec<MemoryItem>)>,
    next_id: usize,
    created: usize,
    removed: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose text field starts with `value`.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::default()
        }
    }

    /// Simulate the user editing the field (the caller then sends `Input`).
    pub fn type_text(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// Items of the attached container, or an empty slice when none is shown.
    pub fn items(&self) -> &[MemoryItem] {
        match &self.attached {
            Some((_, items)) => items,
            None => &[],
        }
    }

    /// Texts of the attached container's items, in order.
    pub fn item_texts(&self) -> Vec<&str> {
        self.items().iter().map(|item| item.text.as_str()).collect()
    }

    /// Indices of items carrying the highlight marker.
    pub fn highlighted_items(&self) -> Vec<usize> {
        self.items()
            .iter()
            .filter(|item| item.highlighted)
            .map(|item| item.index)
            .collect()
    }

    pub fn has_dropdown(&self) -> bool {
        self.attached.is_some()
    }

    /// Number of containers created so far.
    pub fn containers_created(&self) -> usize {
        self.created
    }

    /// Number of containers removed so far.
    pub fn containers_removed(&self) -> usize {
        self.removed
    }

    fn sync_attached(&mut self, container: &MemoryContainer) {
        if let Some((id, items)) = self.attached.as_mut() {
            if *id == container.id {
                *items = container.items.clone();
            }
        }
    }
}

impl Host for MemoryHost {
    type Container = MemoryContainer;

    fn input_value(&self) -> String {
        self.value.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn create_container(&mut self) -> MemoryContainer {
        self.next_id += 1;
        self.created += 1;
        MemoryContainer {
            id: self.next_id,
            items: Vec::new(),
        }
    }

    fn append_item(&mut self, container: &mut MemoryContainer, index: usize, text: &str) {
        container.items.push(MemoryItem {
            index,
            text: text.to_string(),
            highlighted: false,
        });
        self.sync_attached(container);
    }

    fn attach_after_input(&mut self, container: &mut MemoryContainer) {
        self.attached = Some((container.id, container.items.clone()));
    }

    fn remove_container(&mut self, container: MemoryContainer) {
        self.removed += 1;
        if self.attached.as_ref().is_some_and(|(id, _)| *id == container.id) {
            self.attached = None;
        }
    }

    fn set_highlight(&mut self, container: &mut MemoryContainer, index: usize, highlighted: bool) {
        if let Some(item) = container.items.get_mut(index) {
            item.highlighted = highlighted;
        }
        self.sync_attached(container);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_host_is_empty() {
        let host = MemoryHost::new();
        assert_eq!(host.input_value(), "");
        assert!(!host.has_dropdown());
        assert!(host.items().is_empty());
    }

    #[test]
    fn test_container_lifecycle() {
        let mut host = MemoryHost::with_value("ca");
        let mut container = host.create_container();
        host.append_item(&mut container, 0, "Canada");
        host.append_item(&mut container, 1, "Chile");
        assert!(!host.has_dropdown());

        host.attach_after_input(&mut container);
        assert_eq!(host.item_texts(), vec!["Canada", "Chile"]);

        host.set_highlight(&mut container, 1, true);
        assert_eq!(host.highlighted_items(), vec![1]);
        host.set_highlight(&mut container, 1, false);
        assert!(host.highlighted_items().is_empty());

        host.remove_container(container);
        assert!(!host.has_dropdown());
        assert_eq!(host.containers_created(), 1);
        assert_eq!(host.containers_removed(), 1);
    }

    #[test]
    fn test_removing_detached_container_keeps_attached_one() {
        let mut host = MemoryHost::new();
        let mut shown = host.create_container();
        host.append_item(&mut shown, 0, "Peru");
        host.attach_after_input(&mut shown);

        let detached = host.create_container();
        host.remove_container(detached);
        assert_eq!(host.item_texts(), vec!["Peru"]);
    }
}
