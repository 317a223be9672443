//! Visible text extraction
//!
//! Produces the plain text of a page: every text node outside `<script>` and
//! `<style>`, separated by single spaces with whitespace runs collapsed.

use scraper::node::Node;
use scraper::Html;

/// Elements whose text is never visible content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Returns the normalized visible text of a parsed document
pub fn page_text(document: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            matches!(
                ancestor.value(),
                Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name())
            )
        });

        if !hidden {
            pieces.push(text);
        }
    }

    normalize_whitespace(&pieces.join(" "))
}

/// Parses raw HTML and returns its normalized visible text
///
/// # Example
///
/// ```
/// use insurance_compare::crawler::extract_page_text;
///
/// let html = "<html><body><h1>Seguros</h1>\n<p>Auto   y <b>hogar</b></p><script>x()</script></body></html>";
/// assert_eq!(extract_page_text(html), "Seguros Auto y hogar");
/// ```
pub fn extract_page_text(html: &str) -> String {
    page_text(&Html::parse_document(html))
}

/// Collapses every whitespace run to a single space and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
