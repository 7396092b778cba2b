//! Ordered fallback chains of matchers

use crate::dom::HtmlDocument;
use crate::types::EmailDocument;
use std::cell::OnceCell;
use tracing::debug;

/// One document being scanned by a chain
///
/// The HTML tree is only built if a matcher asks for it.
pub struct Scan<'a> {
    pub doc: &'a EmailDocument,
    html: OnceCell<HtmlDocument>,
}

impl<'a> Scan<'a> {
    #[must_use]
    pub const fn new(doc: &'a EmailDocument) -> Self {
        Self {
            doc,
            html: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn subject(&self) -> &'a str {
        &self.doc.subject
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.doc.text()
    }

    #[must_use]
    pub fn html(&self) -> &HtmlDocument {
        self.html.get_or_init(|| HtmlDocument::parse(self.doc.body()))
    }
}

/// A named matcher in a fallback chain
pub struct Matcher<T> {
    pub name: &'static str,
    pub run: fn(&Scan<'_>) -> Option<T>,
}

/// Run `matchers` in order and return the first hit with the matcher's name
pub fn first_match<T>(matchers: &[Matcher<T>], scan: &Scan<'_>) -> Option<(&'static str, T)> {
    matchers.iter().find_map(|m| {
        let hit = (m.run)(scan)?;
        debug!("Matcher '{}' hit", m.name);
        Some((m.name, hit))
    })
}
