use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
};

// UI element styles
pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Rgb(144, 238, 144)) // Light green (softer)
    .add_modifier(Modifier::BOLD);

pub const SELECTED_ITEM_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(0, 95, 135)) // Dark blue background
    .add_modifier(Modifier::BOLD);

pub const FOCUSED_ITEM_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::UNDERLINED);

pub const PANEL_TITLE_STYLE: Style = Style::new()
    .fg(Color::Rgb(144, 238, 144)) // Light green (softer)
    .add_modifier(Modifier::BOLD);
pub const TEXT_FG_COLOR: Color = Color::Rgb(158, 158, 158);

const BORDER_COLOR: Color = Color::Rgb(144, 238, 144);

/// Title for one trigger: selected pairs get the highlight, focus adds an underline
pub fn trigger_title(label: &str, selected: bool, focused: bool) -> Line<'static> {
    let mut style = if selected {
        SELECTED_ITEM_STYLE
    } else {
        Style::default().fg(TEXT_FG_COLOR)
    };
    if focused {
        style = style.patch(FOCUSED_ITEM_STYLE);
    }
    let marker = if focused { "▸ " } else { "  " };
    Line::from(vec![Span::raw(marker), Span::styled(label.to_string(), style)])
}

/// Builds the widgets the demo screen is made of
pub struct TuiManager;

impl Default for TuiManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiManager {
    pub fn new() -> Self {
        TuiManager
    }

    fn block<'a>(&self, title: impl Into<Line<'a>>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(BORDER_COLOR))
            .title(title)
            .title_style(PANEL_TITLE_STYLE)
    }

    /// Horizontal tab bar
    pub fn draw_tabs<'a>(&self, titles: Vec<Line<'a>>, selected: usize, title: &'a str) -> Tabs<'a> {
        Tabs::new(titles)
            .select(selected)
            .block(self.block(title))
            .highlight_style(Style::default().fg(Color::Yellow))
            .divider("|")
    }

    /// Vertical tab column
    pub fn draw_tab_column<'a>(&self, titles: Vec<Line<'a>>, title: &'a str) -> List<'a> {
        List::new(titles.into_iter().map(ListItem::new).collect::<Vec<_>>()).block(self.block(title))
    }

    pub fn draw_panel<'a>(&self, title: String, body: String) -> Paragraph<'a> {
        Paragraph::new(body)
            .style(Style::default().fg(TEXT_FG_COLOR))
            .wrap(Wrap { trim: true })
            .block(self.block(title))
    }

    /// ARIA attribute table: one row per trigger and panel
    pub fn draw_inspector<'a>(&self, rows: Vec<Row<'a>>) -> Table<'a> {
        let header = Row::new(vec!["Element", "Role", "Selected/Expanded", "tabindex", "Hidden", "Class"])
            .style(HEADER_STYLE);
        Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Length(10),
                Constraint::Length(18),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(self.block("ARIA state"))
    }

    pub fn draw_status<'a>(&self, status: &'a str) -> Paragraph<'a> {
        Paragraph::new(status)
            .style(Style::default().fg(TEXT_FG_COLOR))
            .block(self.block("Status"))
    }
}
