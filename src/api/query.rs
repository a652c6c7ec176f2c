//! Query Parameters
//!
//! Ordered query-string builder. The same parameters that go on the wire
//! also produce the cache key for a read, so two requests share a cache
//! entry exactly when they would send the same query.

use std::fmt::Display;

/// Name of the page number parameter.
pub const PAGE: &str = "page";
/// Name of the page size parameter.
pub const PAGE_SIZE: &str = "page_size";

// == Query ==
/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a query for one page of a paginated endpoint.
    pub fn paged(page: u32, page_size: u32) -> Self {
        Self::new().set(PAGE, page).set(PAGE_SIZE, page_size)
    }

    // == Set ==
    /// Sets `name` to `value`, replacing a previous value in place.
    pub fn set(mut self, name: &str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((name.to_string(), value)),
        }
        self
    }

    /// Sets `name` only when `value` is present and not blank.
    pub fn set_opt(self, name: &str, value: Option<impl Display>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.trim().is_empty() => self.set(name, v),
            _ => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    // == Cache Key ==
    /// Builds a deterministic cache key under `prefix`.
    ///
    /// Pagination values are appended positionally and every other
    /// parameter as `name=value`, in insertion order:
    /// `Query::paged(1, 10).cache_key("stock-1")` is `stock-1-1-10`.
    ///
    /// Values are percent-encoded, `-` included, so free text can never
    /// forge a separator or another parameter.
    pub fn cache_key(&self, prefix: &str) -> String {
        let mut key = prefix.to_string();
        for (name, value) in &self.params {
            key.push('-');
            if name != PAGE && name != PAGE_SIZE {
                key.push_str(name);
                key.push('=');
            }
            key.push_str(&key_segment(value));
        }
        key
    }
}

fn key_segment(value: &str) -> String {
    urlencoding::encode(value).replace('-', "%2D")
}
