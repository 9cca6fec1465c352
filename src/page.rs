use crate::dom::{Document, ElementId, RenderTree};
use crate::error::{Result, TabsError};
use crate::event::{DispatchOutcome, EventType, Key, ListenerId};
use crate::settings::TabSettings;
use crate::tabs::TabController;
use log::{debug, info};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
enum PageEvent<'a> {
    Click,
    KeyDown(&'a Key),
}

impl PageEvent<'_> {
    fn event_type(self) -> EventType {
        match self {
            PageEvent::Click => EventType::Click,
            PageEvent::KeyDown(_) => EventType::KeyDown,
        }
    }
}

/// A document plus the tab controllers mounted on it.
///
/// Events are delivered to the target and then its ancestors; afterwards the
/// host default runs unless a listener prevented it: clicks focus the nearest
/// focusable element, Tab/Shift+Tab traverse sequentially, and Enter/Space on
/// a button turn into a click.
#[derive(Debug, Clone, Default)]
pub struct Page {
    document: Document,
    controllers: Vec<Option<TabController>>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            controllers: Vec::new(),
        }
    }

    pub fn parse(markup: &str) -> Result<Self> {
        Ok(Self::new(Document::parse(markup)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Document::load(path)?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Build a controller over the given tablist and panels
    pub fn mount(
        &mut self,
        tablist_selector: &str,
        panels_selector: &str,
        settings: &TabSettings,
    ) -> Result<ListenerId> {
        let id = ListenerId(self.controllers.len());
        let controller = TabController::new(
            &mut self.document,
            id,
            tablist_selector,
            panels_selector,
            settings,
        )?;
        info!(
            "Mounted tabs {} on '{}' with {} triggers",
            id,
            tablist_selector,
            controller.len()
        );
        self.controllers.push(Some(controller));
        Ok(id)
    }

    /// Dispose a controller; returns the number of listeners detached
    pub fn unmount(&mut self, id: ListenerId) -> Result<usize> {
        let controller = self
            .controllers
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(TabsError::UnknownController(id.0))?;
        let removed = controller.dispose(&mut self.document);
        info!("Unmounted tabs {}", id);
        Ok(removed)
    }

    pub fn controller(&self, id: ListenerId) -> Option<&TabController> {
        self.controllers.get(id.0).and_then(Option::as_ref)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &TabController> {
        self.controllers.iter().flatten()
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.document.focused()
    }

    /// Programmatic focus, as a script or test harness would apply it
    pub fn focus(&mut self, element: ElementId) -> bool {
        self.document.focus(element)
    }

    pub fn click(&mut self, target: ElementId) -> Result<DispatchOutcome> {
        let outcome = self.dispatch(target, PageEvent::Click)?;
        if !outcome.default_prevented {
            let focus_to = std::iter::once(target)
                .chain(self.document.ancestors(target))
                .find(|&el| self.document.is_focusable(el));
            if let Some(el) = focus_to {
                self.document.focus(el);
            }
        }
        Ok(outcome)
    }

    /// Deliver a keydown to the focused element (the root when nothing has focus)
    pub fn key_down(&mut self, key: &Key) -> Result<DispatchOutcome> {
        let target = self.document.focused().unwrap_or(self.document.root());
        let outcome = self.dispatch(target, PageEvent::KeyDown(key))?;
        if !outcome.default_prevented {
            match key {
                Key::Tab => {
                    self.document.focus_next();
                }
                Key::BackTab => {
                    self.document.focus_previous();
                }
                Key::Enter | Key::Space if self.document.tag_name(target) == Some("button") => {
                    self.click(target)?;
                }
                _ => {}
            }
        }
        Ok(outcome)
    }

    fn dispatch(&mut self, target: ElementId, event: PageEvent<'_>) -> Result<DispatchOutcome> {
        let path: Vec<ElementId> = std::iter::once(target)
            .chain(self.document.ancestors(target))
            .collect();
        let mut outcome = DispatchOutcome::IGNORED;
        for current in path {
            for listener in self.document.listeners(current, event.event_type()) {
                let Some(Some(controller)) = self.controllers.get_mut(listener.0) else {
                    continue;
                };
                let result = match event {
                    PageEvent::Click => controller.handle_click(&mut self.document, current)?,
                    PageEvent::KeyDown(key) => {
                        controller.handle_keydown(&mut self.document, current, key)?
                    }
                };
                outcome = outcome.merge(result);
            }
        }
        debug!("Dispatched {:?} to {}: {:?}", event, target, outcome);
        Ok(outcome)
    }

    /// Short `tag#id.class` label for an element
    pub fn label(&self, element: ElementId) -> String {
        let doc = &self.document;
        let mut label = doc.tag_name(element).unwrap_or("?").to_string();
        if let Some(id) = doc.attribute(element, "id") {
            label.push('#');
            label.push_str(id);
        }
        for class in doc.class_list(element) {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    /// Plain-text report of every mounted tablist and its ARIA state
    pub fn describe(&self) -> String {
        let doc = &self.document;
        let attr = |el: ElementId, name: &str| doc.attribute(el, name).unwrap_or("-").to_string();
        let mut lines = Vec::new();

        for controller in self.controllers() {
            lines.push(format!(
                "tabs {} on {} ({}) selected={} active={}",
                controller.listener(),
                self.label(controller.tablist()),
                controller.orientation(),
                controller.selected_index(),
                controller.active_index()
            ));
            for (index, trigger) in controller.triggers().iter().enumerate() {
                let marker = if doc.focused() == Some(trigger.element) {
                    '*'
                } else {
                    ' '
                };
                lines.push(format!(
                    "{} [{}] {:<16} controls={} aria-selected={} tabindex={} class=\"{}\"",
                    marker,
                    index,
                    doc.text_content(trigger.element),
                    trigger.controls,
                    attr(trigger.element, "aria-selected"),
                    attr(trigger.element, "tabindex"),
                    doc.class_list(trigger.element).join(" ")
                ));
            }
            for &panel in controller.panels() {
                lines.push(format!(
                    "  {} {} aria-expanded={} tabindex={}",
                    self.label(panel),
                    if doc.is_hidden(panel) { "hidden" } else { "visible" },
                    attr(panel, "aria-expanded"),
                    attr(panel, "tabindex")
                ));
            }
        }
        lines.push(match doc.focused() {
            Some(el) => format!("focus: {}", self.label(el)),
            None => "focus: none".to_string(),
        });
        lines.join("\n")
    }
}
