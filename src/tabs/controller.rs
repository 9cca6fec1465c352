use super::cursor::TabCursor;
use super::orientation::{NavAction, Orientation};
use crate::dom::{ElementId, RenderTree};
use crate::error::{Result, TabsError};
use crate::event::{DispatchOutcome, EventType, Key, ListenerId};
use crate::settings::TabSettings;
use log::debug;
use std::collections::HashMap;

/// Selector combined with the tablist scope to find trigger buttons
const TRIGGER_SELECTOR: &str = r#"[role="tab"]"#;

/// A tab button and the id of the panel it reveals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub element: ElementId,
    pub controls: String,
}

/// Keeps one trigger/panel pair selected and moves focus between triggers
#[derive(Debug, Clone)]
pub struct TabController {
    listener: ListenerId,
    tablist: ElementId,
    triggers: Vec<Trigger>,
    panels: Vec<ElementId>,
    panels_by_id: HashMap<String, ElementId>,
    cursor: TabCursor,
    selected: usize,
    orientation: Orientation,
    selected_class: String,
}

impl TabController {
    /// Resolve triggers and panels, normalise their state, select the initial
    /// pair and register click/keydown listeners under `listener`.
    pub fn new<T: RenderTree>(
        tree: &mut T,
        listener: ListenerId,
        tablist_selector: &str,
        panels_selector: &str,
        settings: &TabSettings,
    ) -> Result<Self> {
        let tablist = tree
            .query_selector(tablist_selector)?
            .ok_or_else(|| TabsError::MissingTablist(tablist_selector.to_string()))?;

        let trigger_elements = tree.query_selector_all_in(tablist, TRIGGER_SELECTOR)?;
        if trigger_elements.is_empty() {
            return Err(TabsError::NoTriggers(tablist_selector.to_string()));
        }

        let panels = tree.query_selector_all(panels_selector)?;
        let mut panels_by_id = HashMap::new();
        for &panel in &panels {
            if let Some(id) = tree.attribute(panel, "id") {
                panels_by_id.entry(id.to_string()).or_insert(panel);
            }
        }

        let mut triggers = Vec::with_capacity(trigger_elements.len());
        for (index, &element) in trigger_elements.iter().enumerate() {
            let controls = tree
                .attribute(element, "aria-controls")
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or(TabsError::MissingControls { index })?
                .to_string();
            if !panels_by_id.contains_key(&controls) {
                return Err(TabsError::UnknownPanel {
                    index,
                    panel_id: controls,
                });
            }
            triggers.push(Trigger { element, controls });
        }

        let initial = settings.initial_index();
        let cursor = TabCursor::new(triggers.len(), initial)?;
        let orientation = Orientation::from_attribute(tree.attribute(tablist, "aria-orientation"));

        let controller = Self {
            listener,
            tablist,
            triggers,
            panels,
            panels_by_id,
            cursor,
            selected: initial,
            orientation,
            selected_class: settings.selected_class.clone(),
        };

        controller.reset_panels(tree);
        controller.deselect_triggers(tree);
        controller.activate(tree, initial);
        for trigger in &controller.triggers {
            tree.add_event_listener(trigger.element, EventType::Click, listener);
            tree.add_event_listener(trigger.element, EventType::KeyDown, listener);
        }

        debug!(
            "Tabs {} ready: {} triggers, {} orientation, selected {}",
            listener,
            controller.triggers.len(),
            controller.orientation,
            initial
        );
        Ok(controller)
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    pub fn tablist(&self) -> ElementId {
        self.tablist
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn panels(&self) -> &[ElementId] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Trigger the keyboard cursor is on (focus roams here without selecting)
    pub fn active_index(&self) -> usize {
        self.cursor.index()
    }

    /// Trigger whose panel is currently shown
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn trigger_index(&self, element: ElementId) -> Option<usize> {
        self.triggers.iter().position(|t| t.element == element)
    }

    /// Panel revealed by the trigger at `index`
    pub fn panel_for(&self, index: usize) -> Option<ElementId> {
        self.triggers
            .get(index)
            .and_then(|t| self.panels_by_id.get(&t.controls))
            .copied()
    }

    /// Select `trigger` and show its panel. Focus is left where it is.
    pub fn select_tab<T: RenderTree>(&mut self, tree: &mut T, trigger: ElementId) -> Result<()> {
        let index = self
            .trigger_index(trigger)
            .ok_or(TabsError::UnknownTrigger(trigger.index()))?;
        self.select_index(tree, index)
    }

    pub fn select_index<T: RenderTree>(&mut self, tree: &mut T, index: usize) -> Result<()> {
        self.cursor.jump_to(index)?;
        self.deselect_triggers(tree);
        self.reset_panels(tree);
        self.activate(tree, index);
        self.selected = index;
        debug!("Tabs {} selected trigger {}", self.listener, index);
        Ok(())
    }

    /// Click on one of our triggers: select it, then focus it
    pub fn handle_click<T: RenderTree>(
        &mut self,
        tree: &mut T,
        current_target: ElementId,
    ) -> Result<DispatchOutcome> {
        let Some(index) = self.trigger_index(current_target) else {
            return Ok(DispatchOutcome::IGNORED);
        };
        self.select_index(tree, index)?;
        tree.focus(current_target);
        Ok(DispatchOutcome::handled())
    }

    /// Keydown on one of our triggers. Arrow keys and Home/End move focus only;
    /// Enter and Space select. Unmapped keys are left to the host untouched.
    pub fn handle_keydown<T: RenderTree>(
        &mut self,
        tree: &mut T,
        current_target: ElementId,
        key: &Key,
    ) -> Result<DispatchOutcome> {
        let Some(index) = self.trigger_index(current_target) else {
            return Ok(DispatchOutcome::IGNORED);
        };
        let Some(action) = self.orientation.action_for(key) else {
            return Ok(DispatchOutcome::IGNORED);
        };

        self.cursor.jump_to(index)?;
        match action {
            NavAction::Previous => {
                self.cursor.previous();
            }
            NavAction::Next => {
                self.cursor.next();
            }
            NavAction::First => {
                self.cursor.first();
            }
            NavAction::Last => {
                self.cursor.last();
            }
            NavAction::Activate => self.select_index(tree, index)?,
        }

        let focus_to = self.triggers[self.cursor.index()].element;
        tree.focus(focus_to);
        debug!(
            "Tabs {} key {} ({:?}) -> focus trigger {}",
            self.listener,
            key,
            action,
            self.cursor.index()
        );
        Ok(DispatchOutcome::prevented())
    }

    /// Detach this controller's listeners. Attribute state is left as is.
    pub fn dispose<T: RenderTree>(self, tree: &mut T) -> usize {
        let removed = tree.remove_event_listeners(self.listener);
        debug!("Tabs {} disposed, {} listeners removed", self.listener, removed);
        removed
    }

    fn deselect_triggers<T: RenderTree>(&self, tree: &mut T) {
        for trigger in &self.triggers {
            tree.remove_class(trigger.element, &self.selected_class);
            tree.set_attribute(trigger.element, "tabindex", "-1");
            tree.set_attribute(trigger.element, "aria-selected", "false");
        }
    }

    /// Hide every panel; `tabindex=0` keeps panel content reachable once shown
    fn reset_panels<T: RenderTree>(&self, tree: &mut T) {
        for &panel in &self.panels {
            tree.set_attribute(panel, "hidden", "");
            tree.set_attribute(panel, "aria-expanded", "false");
            tree.set_attribute(panel, "tabindex", "0");
        }
    }

    fn activate<T: RenderTree>(&self, tree: &mut T, index: usize) {
        let trigger = &self.triggers[index];
        tree.add_class(trigger.element, &self.selected_class);
        tree.set_attribute(trigger.element, "aria-selected", "true");
        tree.remove_attribute(trigger.element, "tabindex");
        if let Some(&panel) = self.panels_by_id.get(&trigger.controls) {
            tree.remove_attribute(panel, "hidden");
            tree.set_attribute(panel, "aria-expanded", "true");
        }
    }
}
