use super::base::RenderTree;
use super::selector::SelectorList;
use crate::error::Result;
use crate::event::{EventType, ListenerId};
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// Tags that take sequential focus without an explicit `tabindex`
const NATIVELY_FOCUSABLE: &[&str] = &["button", "input", "select", "textarea"];

/// Handle to an element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: String,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            text: String::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Text placed directly inside this element
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration {
    element: ElementId,
    event: EventType,
    listener: ListenerId,
}

/// In-memory render tree rooted at a synthetic `body` element
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    focused: Option<ElementId>,
    registrations: Vec<Registration>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            focused: None,
            registrations: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Create a detached element; it becomes visible to queries once appended
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(Element::new(tag));
        ElementId(self.elements.len() - 1)
    }

    /// Append `child` under `parent`, moving it if it was already attached.
    /// Returns false when the move would create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if child == self.root()
            || self.element(parent).is_none()
            || self.element(child).is_none()
            || parent == child
            || self.contains(child, parent)
        {
            return false;
        }
        if let Some(old_parent) = self.elements[child.0].parent {
            self.elements[old_parent.0].children.retain(|&c| c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
        true
    }

    pub fn append_text(&mut self, element: ElementId, text: &str) {
        if let Some(el) = self.elements.get_mut(element.0) {
            if !el.text.is_empty() {
                el.text.push(' ');
            }
            el.text.push_str(text);
        }
    }

    /// Handle for the element stored at `index`, if there is one
    pub fn element_id(&self, index: usize) -> Option<ElementId> {
        (index < self.elements.len()).then_some(ElementId(index))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn tag_name(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|el| el.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map_or(&[][..], |el| el.children.as_slice())
    }

    /// Parent chain of `id`, nearest first
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |&el| self.parent(el))
    }

    /// Whether `element` sits somewhere below `ancestor`
    pub fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        self.ancestors(element).any(|el| el == ancestor)
    }

    /// Descendants of `id` in document order
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.children(el).iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&el| self.attribute(el, "id") == Some(id))
    }

    pub fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    pub fn class_list(&self, element: ElementId) -> Vec<&str> {
        self.attribute(element, "class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.class_list(element).contains(&class)
    }

    /// Text of the element and everything below it, whitespace-joined
    pub fn text_content(&self, element: ElementId) -> String {
        std::iter::once(element)
            .chain(self.descendants(element))
            .filter_map(|el| self.element(el))
            .map(Element::text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when the element or one of its ancestors carries `hidden`
    pub fn is_hidden(&self, element: ElementId) -> bool {
        self.has_attribute(element, "hidden")
            || self.ancestors(element).any(|el| self.has_attribute(el, "hidden"))
    }

    /// Effective tab index: the `tabindex` attribute, else 0 for natively focusable elements
    pub fn tab_index(&self, element: ElementId) -> Option<i32> {
        if let Some(value) = self.attribute(element, "tabindex") {
            if let Ok(index) = value.trim().parse::<i32>() {
                return Some(index);
            }
        }
        let tag = self.tag_name(element)?;
        if NATIVELY_FOCUSABLE.contains(&tag) || (tag == "a" && self.has_attribute(element, "href"))
        {
            Some(0)
        } else {
            None
        }
    }

    /// Can take focus programmatically (sequentially or not)
    pub fn is_focusable(&self, element: ElementId) -> bool {
        self.element(element).is_some()
            && self.tab_index(element).is_some()
            && !self.has_attribute(element, "disabled")
            && !self.is_hidden(element)
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Elements reached by Tab, in the order Tab visits them
    pub fn sequential_focus_order(&self) -> Vec<ElementId> {
        let mut positive = Vec::new();
        let mut zero = Vec::new();
        for el in self.descendants(self.root()) {
            if !self.is_focusable(el) {
                continue;
            }
            match self.tab_index(el) {
                Some(index) if index > 0 => positive.push((index, el)),
                Some(0) => zero.push(el),
                _ => {}
            }
        }
        positive.sort_by_key(|&(index, _)| index);
        positive
            .into_iter()
            .map(|(_, el)| el)
            .chain(zero)
            .collect()
    }

    /// Default action of Tab
    pub fn focus_next(&mut self) -> Option<ElementId> {
        self.step_focus(true)
    }

    /// Default action of Shift+Tab
    pub fn focus_previous(&mut self) -> Option<ElementId> {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> Option<ElementId> {
        let order = self.sequential_focus_order();
        let (first, last) = (*order.first()?, *order.last()?);
        let target = match self.focused {
            None => {
                if forward {
                    first
                } else {
                    last
                }
            }
            Some(current) => match order.iter().position(|&el| el == current) {
                Some(pos) if forward => order[(pos + 1) % order.len()],
                Some(pos) => order[(pos + order.len() - 1) % order.len()],
                None => {
                    // Not in the Tab order (e.g. tabindex=-1): continue from its place in the tree
                    let positions = self.document_positions();
                    let here = positions[current.0];
                    if forward {
                        order
                            .iter()
                            .copied()
                            .find(|el| positions[el.0] > here)
                            .unwrap_or(first)
                    } else {
                        order
                            .iter()
                            .rev()
                            .copied()
                            .find(|el| positions[el.0] < here)
                            .unwrap_or(last)
                    }
                }
            },
        };
        debug!(
            "Sequential focus {} -> {}",
            if forward { "forward" } else { "backward" },
            target
        );
        self.focused = Some(target);
        Some(target)
    }

    /// Preorder position of every element; detached elements sort last
    pub(super) fn document_positions(&self) -> Vec<usize> {
        let mut positions = vec![usize::MAX; self.elements.len()];
        positions[0] = 0;
        for (pos, el) in self.descendants(self.root()).into_iter().enumerate() {
            positions[el.0] = pos + 1;
        }
        positions
    }

    /// Listener ids registered for `event` directly on `element`
    pub fn listeners(&self, element: ElementId, event: EventType) -> Vec<ListenerId> {
        self.registrations
            .iter()
            .filter(|r| r.element == element && r.event == event)
            .map(|r| r.listener)
            .collect()
    }

    fn query_in(&self, scope: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        let selectors = SelectorList::parse(selector)?;
        let found: Vec<ElementId> = selectors
            .select(self)
            .into_iter()
            .filter(|&el| self.contains(scope, el))
            .collect();
        debug!("Selector '{}' matched {} element(s)", selectors.as_str(), found.len());
        Ok(found)
    }
}

impl RenderTree for Document {
    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementId>> {
        self.query_in(self.root(), selector)
    }

    fn query_selector_all_in(&self, scope: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        self.query_in(scope, selector)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        let attributes = &self.element(element)?.attributes;
        match attributes.get(name) {
            Some(value) => Some(value.as_str()),
            None => attributes
                .get(&name.to_ascii_lowercase())
                .map(String::as_str),
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.attributes.remove(&name.to_ascii_lowercase());
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if self.element(element).is_none() || self.has_class(element, class) {
            return;
        }
        let mut classes: Vec<String> = self
            .class_list(element)
            .into_iter()
            .map(str::to_string)
            .collect();
        classes.push(class.to_string());
        self.set_attribute(element, "class", &classes.join(" "));
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if !self.has_class(element, class) {
            return;
        }
        let classes: Vec<String> = self
            .class_list(element)
            .into_iter()
            .filter(|&c| c != class)
            .map(str::to_string)
            .collect();
        self.set_attribute(element, "class", &classes.join(" "));
    }

    fn focus(&mut self, element: ElementId) -> bool {
        if !self.is_focusable(element) {
            debug!("Ignoring focus on non-focusable element {}", element);
            return false;
        }
        self.focused = Some(element);
        true
    }

    fn add_event_listener(&mut self, element: ElementId, event: EventType, listener: ListenerId) {
        let registration = Registration {
            element,
            event,
            listener,
        };
        if !self.registrations.contains(&registration) {
            self.registrations.push(registration);
        }
    }

    fn remove_event_listeners(&mut self, listener: ListenerId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.listener != listener);
        before - self.registrations.len()
    }
}
