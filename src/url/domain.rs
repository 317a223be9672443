use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is not part of the domain.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use insurance_compare::url::extract_domain;
///
/// let url = Url::parse("https://www.fedpat.com.ar/productos").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.fedpat.com.ar".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the host and explicit port of a URL, e.g. `example.com:8080`
///
/// URLs sharing this key share one extraction session.
pub fn host_key(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
