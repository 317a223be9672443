/// Checks if a host is covered by an allow-list entry
///
/// An entry covers the host itself and all of its subdomains. A leading
/// `*.` on the entry is accepted and means the same thing.
///
/// # Examples
///
/// ```
/// use insurance_compare::url::matches_host;
///
/// assert!(matches_host("galiciaseguros.com.ar", "galiciaseguros.com.ar"));
/// assert!(matches_host("galiciaseguros.com.ar", "www.galiciaseguros.com.ar"));
/// assert!(matches_host("*.example.com", "example.com"));
/// assert!(!matches_host("galiciaseguros.com.ar", "notgaliciaseguros.com.ar"));
/// ```
pub fn matches_host(entry: &str, host: &str) -> bool {
    let base = entry.strip_prefix("*.").unwrap_or(entry).to_lowercase();
    let host = host.to_lowercase();

    if base.is_empty() {
        return false;
    }

    host == base || host.ends_with(&format!(".{}", base))
}

/// Returns true if any allow-list entry covers the host
pub fn matches_any_host(entries: &[String], host: &str) -> bool {
    entries.iter().any(|entry| matches_host(entry, host))
}
