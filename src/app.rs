use crate::dom::{ElementId, RenderTree};
use crate::event::{Key, ListenerId};
use crate::page::Page;
use crate::tabs::{Orientation, TabController};
use crate::tui_manager::{trigger_title, TuiManager};
use crossterm::event::{KeyCode, KeyModifiers};
use log::{debug, error};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Row;
use ratatui::Frame;

/// Horizontal sample page
pub const BASE_PAGE: &str = include_str!("../fixtures/base.html");
/// Vertical sample page
pub const VERTICAL_PAGE: &str = include_str!("../fixtures/vertical.html");

pub struct App {
    page: Page,
    tabs: ListenerId,
    should_quit: bool,
    status: String,
    tui_manager: TuiManager,
}

impl App {
    /// Wrap a page with mounted tabs; focus starts on the selected trigger
    pub fn new(mut page: Page, tabs: ListenerId) -> Self {
        let start = page
            .controller(tabs)
            .and_then(|c| c.triggers().get(c.selected_index()))
            .map(|t| t.element);
        if let Some(trigger) = start {
            page.focus(trigger);
        }
        Self {
            page,
            tabs,
            should_quit: false,
            status: "←/→ or ↑/↓ move focus, Enter/Space select, Tab leaves the tablist, 1-9 click, q quits".to_string(),
            tui_manager: TuiManager::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn handle_input(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char(digit @ '1'..='9') => self.click_trigger(digit as usize - '1' as usize),
            code => {
                let key = if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
                    Key::BackTab
                } else {
                    Key::from(code)
                };
                self.press(&key);
            }
        }
    }

    /// Send one key to the focused element
    pub fn press(&mut self, key: &Key) {
        match self.page.key_down(key) {
            Ok(outcome) => {
                debug!("Key {} -> {:?}", key, outcome);
                self.status = format!(
                    "{}: {}{}",
                    key,
                    if outcome.handled { "handled" } else { "not handled" },
                    if outcome.default_prevented {
                        ", default prevented"
                    } else {
                        ""
                    }
                );
            }
            Err(e) => {
                error!("Key {} failed: {}", key, e);
                self.status = format!("{}: {}", key, e);
            }
        }
    }

    fn click_trigger(&mut self, index: usize) {
        let Some(trigger) = self
            .controller()
            .and_then(|c| c.triggers().get(index))
            .map(|t| t.element)
        else {
            self.status = format!("No trigger {}", index + 1);
            return;
        };
        match self.page.click(trigger) {
            Ok(_) => self.status = format!("Clicked trigger {}", index + 1),
            Err(e) => {
                error!("Click on trigger {} failed: {}", index + 1, e);
                self.status = e.to_string();
            }
        }
    }

    fn controller(&self) -> Option<&TabController> {
        self.page.controller(self.tabs)
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let Some(controller) = self.controller() else {
            return;
        };
        let inspector_height = (controller.len() + controller.panels().len()) as u16 + 3;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(inspector_height),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_tabs_and_panel(frame, controller, chunks[0]);
        frame.render_widget(self.tui_manager.draw_inspector(self.inspector_rows(controller)), chunks[1]);
        frame.render_widget(self.tui_manager.draw_status(&self.status), chunks[2]);
    }

    fn draw_tabs_and_panel(&self, frame: &mut Frame, controller: &TabController, area: Rect) {
        let doc = self.page.document();
        let titles: Vec<Line<'static>> = controller
            .triggers()
            .iter()
            .map(|t| {
                trigger_title(
                    &doc.text_content(t.element),
                    doc.attribute(t.element, "aria-selected") == Some("true"),
                    doc.focused() == Some(t.element),
                )
            })
            .collect();

        let panel_area = match controller.orientation() {
            Orientation::Horizontal => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(area);
                frame.render_widget(
                    self.tui_manager
                        .draw_tabs(titles, controller.selected_index(), "Tabs"),
                    chunks[0],
                );
                chunks[1]
            }
            Orientation::Vertical => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
                    .split(area);
                frame.render_widget(self.tui_manager.draw_tab_column(titles, "Tabs"), chunks[0]);
                chunks[1]
            }
        };

        let visible: Vec<ElementId> = controller
            .panels()
            .iter()
            .copied()
            .filter(|&p| !doc.is_hidden(p))
            .collect();
        let (title, body) = match visible.first() {
            Some(&panel) => {
                let focus_note = doc
                    .focused()
                    .filter(|&f| f == panel || doc.contains(panel, f))
                    .map(|f| format!(" (focus: {})", self.page.label(f)))
                    .unwrap_or_default();
                (
                    format!("{}{}", self.page.label(panel), focus_note),
                    doc.text_content(panel),
                )
            }
            None => ("Panel".to_string(), String::new()),
        };
        frame.render_widget(self.tui_manager.draw_panel(title, body), panel_area);
    }

    fn inspector_rows(&self, controller: &TabController) -> Vec<Row<'static>> {
        let doc = self.page.document();
        let attr = |el: ElementId, name: &str| doc.attribute(el, name).unwrap_or("-").to_string();
        let row = |el: ElementId, state: &str| {
            Row::new(vec![
                self.page.label(el),
                attr(el, "role"),
                attr(el, state),
                attr(el, "tabindex"),
                if doc.is_hidden(el) { "yes" } else { "no" }.to_string(),
                doc.class_list(el).join(" "),
            ])
        };
        controller
            .triggers()
            .iter()
            .map(|t| row(t.element, "aria-selected"))
            .chain(controller.panels().iter().map(|&p| row(p, "aria-expanded")))
            .collect()
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }
}
