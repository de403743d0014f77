use scraper::{Html, Node};

use crate::error::EngineError;

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// A fetched page as handed to the engine.
pub enum Page {
    Html(Html),
    Text(String),
}

impl Page {
    pub fn html(raw: &str) -> Result<Self, EngineError> {
        if raw.trim().is_empty() {
            return Err(EngineError::EmptyPage);
        }
        Ok(Page::Html(Html::parse_document(raw)))
    }

    pub fn text(raw: impl Into<String>) -> Result<Self, EngineError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EngineError::EmptyPage);
        }
        Ok(Page::Text(raw))
    }

    pub fn document(&self) -> Option<&Html> {
        match self {
            Page::Html(doc) => Some(doc),
            Page::Text(_) => None,
        }
    }

    /// Page text with one line per text node, hidden elements left out.
    pub fn visible_text(&self) -> String {
        match self {
            Page::Html(doc) => visible_text(doc),
            Page::Text(t) => t.clone(),
        }
    }
}

pub fn visible_text(doc: &Html) -> String {
    let mut lines = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| match a.value() {
            Node::Element(el) => HIDDEN_TAGS.contains(&el.name()),
            _ => false,
        });
        if hidden {
            continue;
        }
        let line = text.trim();
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// Collapse whitespace runs inside an element's text.
pub fn squash(parts: impl Iterator<Item = impl AsRef<str>>) -> String {
    let mut out = String::new();
    for part in parts {
        for word in part.as_ref().split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }
    out
}
