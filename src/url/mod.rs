//! URL handling module for Insurance-Compare
//!
//! This module provides domain extraction, host allow-list matching, link
//! resolution and the same-site link filter.

mod domain;
mod filter;
mod matcher;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, host_key};
pub use filter::filter_links;
pub use matcher::{matches_any_host, matches_host};
pub use resolve::{is_navigable_href, resolve_link};
