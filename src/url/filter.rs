use crate::config::FilterConfig;
use url::Url;

/// Restricts links to one site and orders them for crawling
///
/// # Filtering Steps
///
/// 1. Keep links whose host contains `domain` (subdomains pass)
/// 2. Drop links whose lowercase form contains any exclusion pattern
/// 3. Move links containing a priority pattern to the front
///
/// Relative order is preserved inside the priority and regular groups, so
/// filtering an already filtered list returns it unchanged.
///
/// # Examples
///
/// ```
/// use insurance_compare::config::FilterConfig;
/// use insurance_compare::url::filter_links;
///
/// let links = vec![
///     "https://example.com/about".to_string(),
///     "https://example.com/productos".to_string(),
///     "https://other.com/x".to_string(),
///     "https://example.com/logo.png".to_string(),
/// ];
/// let filtered = filter_links(&links, "example.com", &FilterConfig::default());
/// assert_eq!(filtered, vec![
///     "https://example.com/productos".to_string(),
///     "https://example.com/about".to_string(),
/// ]);
/// ```
pub fn filter_links(links: &[String], domain: &str, filter: &FilterConfig) -> Vec<String> {
    let domain = domain.to_lowercase();
    let exclude: Vec<String> = filter
        .exclude_patterns
        .iter()
        .map(|p| p.to_lowercase())
        .collect();

    let mut priority = Vec::new();
    let mut regular = Vec::new();

    for link in links {
        if !is_same_site(link, &domain) {
            continue;
        }

        let lower = link.to_lowercase();
        if exclude.iter().any(|pattern| lower.contains(pattern.as_str())) {
            continue;
        }

        if filter
            .priority_patterns
            .iter()
            .any(|pattern| lower.contains(pattern.as_str()))
        {
            priority.push(link.clone());
        } else {
            regular.push(link.clone());
        }
    }

    tracing::debug!(
        "{} priority and {} regular links for {}",
        priority.len(),
        regular.len(),
        domain
    );

    priority.extend(regular);
    tracing::info!(
        "Filtered links: {} (out of {} total)",
        priority.len(),
        links.len()
    );

    priority
}

/// Host substring check; unparseable links and links without a host fail
fn is_same_site(link: &str, domain: &str) -> bool {
    Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.to_lowercase()))
        .map(|host| host.contains(domain))
        .unwrap_or(false)
}
