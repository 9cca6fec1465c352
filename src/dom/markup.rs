//! Loading pages into a [`Document`] and writing them back out for selector matching.
//!
//! Parsing goes through `scraper`'s HTML5 parser, so entities, implied end
//! tags and stray `<` behave as in a browser. Only the contents of `<body>`
//! are kept; the body's own attributes land on the synthetic root.

use super::base::RenderTree;
use super::{Document, ElementId};
use crate::error::Result;
use log::debug;
use scraper::{ElementRef, Html, Node};
use std::fs;
use std::path::Path;

/// Attribute carrying the arena index of each element in serialized snapshots
pub(super) const NODE_ATTRIBUTE: &str = "data-a11y-tabs-node";

/// Elements that never take children
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Build a document from markup; the body's children land under the synthetic root
    pub fn parse(markup: &str) -> Result<Self> {
        let html = Html::parse_document(markup);
        for error in &html.errors {
            debug!("Markup recovered from: {}", error);
        }

        let mut doc = Document::new();
        let body = html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body");
        if let Some(body) = body {
            let root = doc.root();
            for (name, value) in body.value().attrs() {
                doc.set_attribute(root, name, value);
            }
            doc.copy_tree(body, root);
        }
        debug!("Parsed markup into {} elements", doc.descendants(doc.root()).len());
        Ok(doc)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading markup from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn copy_tree(&mut self, source: ElementRef<'_>, target: ElementId) {
        let mut pending = vec![(source, target)];
        while let Some((source, target)) = pending.pop() {
            for child in source.children() {
                match child.value() {
                    Node::Text(text) => {
                        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                        if !collapsed.is_empty() {
                            self.append_text(target, &collapsed);
                        }
                    }
                    Node::Element(_) => {
                        let Some(element) = ElementRef::wrap(child) else {
                            continue;
                        };
                        let id = self.create_element(element.value().name());
                        for (name, value) in element.value().attrs() {
                            self.set_attribute(id, name, value);
                        }
                        self.append_child(target, id);
                        pending.push((element, id));
                    }
                    _ => {}
                }
            }
        }
    }

    /// Whole document as HTML, every element stamped with its arena index
    pub(super) fn to_stamped_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html><html><head></head>");
        self.write_element(self.root(), &mut out);
        out.push_str("</html>");
        out
    }

    fn write_element(&self, id: ElementId, out: &mut String) {
        let Some(element) = self.element(id) else {
            return;
        };
        let tag = element.tag();
        out.push_str(&format!("<{} {}=\"{}\"", tag, NODE_ATTRIBUTE, id.index()));
        for (name, value) in element.attributes() {
            if name == NODE_ATTRIBUTE || !is_attribute_name(name) {
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", name, escape(value, true)));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&tag) {
            return;
        }
        out.push_str(&escape(element.text(), false));
        for &child in self.children(id) {
            self.write_element(child, out);
        }
        out.push_str(&format!("</{}>", tag));
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<'))
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
