//! a11y-tabs - accessible tabbed interfaces
//!
//! Turns a tablist of `[role="tab"]` triggers and their `[role="tabpanel"]`
//! panels into a widget with exactly one visible panel, roving keyboard focus
//! between triggers, and ARIA attributes kept correct after every event.
//! The render tree is abstracted behind [`dom::RenderTree`]; [`dom::Document`]
//! is the in-memory implementation used by [`page::Page`] and the demo app.

pub mod app;
pub mod dom;
pub mod error;
pub mod event;
pub mod page;
pub mod settings;
pub mod tabs;
pub mod tui_manager;

pub use error::{Result, TabsError};
pub use page::Page;
pub use settings::TabSettings;
pub use tabs::TabController;
