pub mod base;
pub mod document;
pub mod markup;
pub mod selector;

pub use base::RenderTree;
pub use document::{Document, Element, ElementId};
pub use selector::SelectorList;
