//! Queries over a parsed HTML body
//!
//! Email bodies are parsed into a tree once per extraction and queried
//! through the named operations here, so each heuristic can be tested
//! without the extractor around it. Plain-text bodies parse into a single
//! text node under `<body>` and work the same way.

use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Node, Selector};
use std::ops::Range;
use std::sync::LazyLock;

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

/// A parsed email body
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a body; malformed markup is recovered, never rejected
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The `<body>` element, or the document root if there is none
    #[must_use]
    pub fn body(&self) -> ElementRef<'_> {
        self.html
            .select(&BODY_SELECTOR)
            .next()
            .unwrap_or_else(|| self.html.root_element())
    }

    /// Text content of the body with all markup removed
    #[must_use]
    pub fn body_text(&self) -> String {
        flattened_text(self.body())
    }

    /// Concatenated text of every element matching `selector`, in document order
    #[must_use]
    pub fn select_text(&self, selector: &Selector) -> String {
        self.html.select(selector).flat_map(|e| e.text()).collect()
    }

    /// Value of `attr` on the first element matching `selector`
    #[must_use]
    pub fn first_attr<'a>(&'a self, selector: &Selector, attr: &str) -> Option<&'a str> {
        self.html
            .select(selector)
            .next()
            .and_then(|e| e.value().attr(attr))
    }

    /// Where `label` first occurs in the body text, and the elements
    /// matching `predicate` that enclose it
    ///
    /// One walk over the tree, iterative so that deeply nested markup
    /// costs no more than flat markup. A label split across several text
    /// nodes is still found; only elements enclosing all of it are kept.
    #[must_use]
    pub fn enclosing<P>(&self, label: &str, predicate: P) -> Option<LabelScope<'_>>
    where
        P: Fn(&ElementRef<'_>) -> bool,
    {
        let text = self.body_text();
        let start = text.find(label)?;
        let label = start..start + label.len();

        let mut offset = 0;
        let mut open: Vec<(ElementRef<'_>, usize)> = Vec::new();
        let mut around: Option<Vec<(ElementRef<'_>, usize)>> = None;
        let mut ends: Vec<usize> = Vec::new();

        for edge in self.body().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Text(t) => {
                        offset += t.len();
                        if around.is_none() && offset > label.start {
                            around = Some(open.clone());
                        }
                    }
                    Node::Element(_) => {
                        if let Some(element) = ElementRef::wrap(node) {
                            open.push((element, offset));
                        }
                    }
                    _ => {}
                },
                Edge::Close(node) => {
                    if node.value().is_element() {
                        open.pop();
                        if around
                            .as_ref()
                            .is_some_and(|a| open.len() + ends.len() + 1 == a.len())
                        {
                            ends.push(offset);
                        }
                    }
                }
            }
        }

        // Enclosing elements close innermost first, so `ends` lines up with
        // `around` reversed. Siblings opened after the label sit at the
        // same depth as a closed enclosing element and are not counted.
        let containers = around?
            .into_iter()
            .rev()
            .zip(ends)
            .filter(|((element, _), end)| *end >= label.end && predicate(element))
            .map(|((element, start), end)| (element, start..end))
            .collect();

        Some(LabelScope {
            text,
            label,
            containers,
        })
    }
}

/// A label located in the body text, with its enclosing elements
pub struct LabelScope<'a> {
    /// Body text the offsets refer to
    pub text: String,
    /// Byte range of the label's first occurrence
    pub label: Range<usize>,
    /// Enclosing elements, innermost first, each with the byte range of its
    /// own text within `text`
    pub containers: Vec<(ElementRef<'a>, Range<usize>)>,
}

/// All descendant text of `element` joined without separators
#[must_use]
pub fn flattened_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Whether `element` is one of the block containers used to scope a section
#[must_use]
pub fn is_section_container(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "table" | "div" | "section")
}
