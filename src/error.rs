//! Error types for tab controllers and the render tree they drive.

/// Errors raised while loading pages, resolving selectors or wiring tabs
#[derive(Debug, thiserror::Error)]
pub enum TabsError {
    /// I/O errors (loading markup from disk)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSS selector
    #[error("Selector error: {selector} - {reason}")]
    Selector { selector: String, reason: String },

    /// The tablist selector matched nothing
    #[error("Tablist not found: {0}")]
    MissingTablist(String),

    /// The tablist has no `[role="tab"]` descendants
    #[error("No tab triggers found in {0}")]
    NoTriggers(String),

    /// A trigger carries no `aria-controls` reference
    #[error("Tab trigger {index} has no aria-controls attribute")]
    MissingControls { index: usize },

    /// A trigger references a panel the panel selector did not find
    #[error("Tab trigger {index} controls unknown panel '{panel_id}'")]
    UnknownPanel { index: usize, panel_id: String },

    /// Initial or requested index is past the last trigger
    #[error("Tab index {index} out of range for {len} tabs")]
    IndexOutOfRange { index: usize, len: usize },

    /// An element handed to a controller is not one of its triggers
    #[error("Element {0} is not a tab trigger of this controller")]
    UnknownTrigger(usize),

    /// No controller is mounted under this listener id
    #[error("No tab controller mounted as listener {0}")]
    UnknownController(usize),
}

/// Convenience Result type using TabsError
pub type Result<T> = std::result::Result<T, TabsError>;

impl TabsError {
    /// Create a Selector error
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from misconfigured markup rather than from I/O or selector syntax
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingTablist(_)
                | Self::NoTriggers(_)
                | Self::MissingControls { .. }
                | Self::UnknownPanel { .. }
                | Self::IndexOutOfRange { .. }
        )
    }
}
