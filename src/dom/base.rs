use super::ElementId;
use crate::error::Result;
use crate::event::{EventType, ListenerId};

/// Trait for render trees a tab controller can drive
pub trait RenderTree {
    /// First element matching the selector, in document order
    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>>;

    /// All elements matching the selector, in document order
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementId>>;

    /// Matching descendants of `scope` (the scope itself excluded)
    fn query_selector_all_in(&self, scope: ElementId, selector: &str) -> Result<Vec<ElementId>>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Move input focus; returns false when the element cannot take focus
    fn focus(&mut self, element: ElementId) -> bool;

    fn add_event_listener(&mut self, element: ElementId, event: EventType, listener: ListenerId);

    /// Detach every registration made under `listener`, returning how many were removed
    fn remove_event_listeners(&mut self, listener: ListenerId) -> usize;
}
