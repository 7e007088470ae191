//! URL Query Helpers
//!
//! Reads and writes the `page` query parameter.

use url::form_urlencoded;

const PAGE_PARAM: &str = "page";

/// Look up a query parameter in a `location.search` string (leading `?` optional)
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(search.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Page requested by the URL. Anything other than a positive integer means page 1.
pub fn page_from_search(search: &str) -> u32 {
    query_param(search, PAGE_PARAM)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Query string that selects `page`
pub fn page_search(page: u32) -> String {
    format!("?{}={}", PAGE_PARAM, page)
}
