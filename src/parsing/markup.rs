//! Markup helpers built on `scraper`'s arena tree.
//!
//! [`strip_tags`] is the tag-stripping renderer used by the plain-text
//! exporter; the other helpers are shared by the line and structural parsers.

use scraper::{ElementRef, Html, Selector};

/// Flattens a markup fragment into plain text.
///
/// Every text leaf is concatenated in document order and all element
/// boundaries (and comments) are discarded. Nested markup such as emphasis
/// inside a body span is handled because the fragment is parsed into a tree
/// first.
///
/// The result is a fixed point: `strip_tags(&strip_tags(x)) == strip_tags(x)`.
/// Text that only becomes markup after entity decoding (`&lt;b&gt;`) is
/// flattened again until nothing changes. A pass that changes the text always
/// shortens it, so the loop terminates.
///
/// # Example
///
/// ```
/// use rpglog::parsing::strip_tags;
///
/// assert_eq!(strip_tags("<b>Alan</b> says <i>hi</i>"), "Alan says hi");
/// assert_eq!(strip_tags("plain"), "plain");
/// ```
pub fn strip_tags(fragment: &str) -> String {
    let mut current = text_leaves(fragment);

    loop {
        let next = text_leaves(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One flattening pass: concatenates the text nodes of the parsed fragment.
fn text_leaves(fragment: &str) -> String {
    if !fragment.contains(['<', '&']) {
        return fragment.to_string();
    }

    let html = Html::parse_fragment(fragment);
    let mut out = String::with_capacity(fragment.len());

    // Pre-order traversal visits text leaves in document order.
    for node in html.tree.root().descendants() {
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
        }
    }

    out
}

/// Parses one line (or any snippet) as a markup fragment.
pub fn fragment(markup: &str) -> Html {
    Html::parse_fragment(markup)
}

/// Returns the first element in `html` matching `selector`.
pub fn first<'a>(html: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    html.select(selector).next()
}

/// Returns the trimmed inner markup of the first `selector` match below
/// `element`.
pub fn inner_of(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|found| found.inner_html().trim().to_string())
}

/// Compiles a CSS selector that is known to be valid.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{css}': {e}"))
}
