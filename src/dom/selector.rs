//! CSS selectors over a [`Document`], matched with `scraper`.
//!
//! The document is mutable while `scraper`'s tree is not, so each query
//! matches against a fresh snapshot in which every element carries its arena
//! index. Anything `scraper` parses is supported: attribute operators,
//! `:not()`, structural pseudo-classes and all combinators.

use super::markup::NODE_ATTRIBUTE;
use super::{Document, ElementId};
use crate::error::{Result, TabsError};
use scraper::{Html, Selector};

#[derive(Debug, Clone)]
pub struct SelectorList {
    source: String,
    selector: Selector,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self> {
        let selector =
            Selector::parse(source).map_err(|e| TabsError::selector(source, e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matching elements attached to `doc`, in document order
    pub fn select(&self, doc: &Document) -> Vec<ElementId> {
        let snapshot = Html::parse_document(&doc.to_stamped_html());
        let positions = doc.document_positions();
        let mut found: Vec<ElementId> = snapshot
            .select(&self.selector)
            .filter_map(|el| el.value().attr(NODE_ATTRIBUTE))
            .filter_map(|stamp| stamp.parse::<usize>().ok())
            .filter_map(|index| doc.element_id(index))
            .collect();
        found.sort_by_key(|el| positions[el.index()]);
        found.dedup();
        found
    }
}
