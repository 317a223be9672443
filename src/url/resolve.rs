use url::{ParseError, Url};

/// Href prefixes that never point at another page
const NON_NAVIGABLE_PREFIXES: &[&str] = &["javascript:", "#", "mailto:", "tel:"];

/// Checks whether a raw href may enter the candidate link set
///
/// Rejects empty values, fragment-only anchors and the `javascript:`,
/// `mailto:` and `tel:` schemes (case-insensitive).
pub fn is_navigable_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() {
        return false;
    }

    let lower = href.to_ascii_lowercase();
    !NON_NAVIGABLE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Resolves a raw href against the URL of the page it was found on
///
/// Absolute hrefs come back unchanged (in their serialized form); relative
/// and root-relative hrefs are joined onto `base`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use insurance_compare::url::resolve_link;
///
/// let base = Url::parse("https://example.com/seguros/auto").unwrap();
/// assert_eq!(resolve_link("/productos", &base).unwrap(), "https://example.com/productos");
/// assert_eq!(resolve_link("hogar", &base).unwrap(), "https://example.com/seguros/hogar");
/// assert_eq!(resolve_link("https://other.com/x", &base).unwrap(), "https://other.com/x");
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Result<String, ParseError> {
    base.join(href.trim()).map(|url| url.to_string())
}
