/// Class toggled on the selected trigger unless configured otherwise
pub const DEFAULT_SELECTED_CLASS: &str = "active";

/// Construction options for a tab controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSettings {
    /// Trigger selected at construction; `None` means the first one
    pub initial_index: Option<usize>,
    /// Class added to the selected trigger and removed from the rest
    pub selected_class: String,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            initial_index: None,
            selected_class: DEFAULT_SELECTED_CLASS.to_string(),
        }
    }
}

impl TabSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    pub fn with_selected_class(mut self, class: impl Into<String>) -> Self {
        self.selected_class = class.into();
        self
    }

    pub fn initial_index(&self) -> usize {
        self.initial_index.unwrap_or(0)
    }
}
