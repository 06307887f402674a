use serde::{Deserialize, Serialize};

/// One page of results returned by a [`PageSource`](super::PageSource).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// False once the source knows there is nothing after this page.
    pub has_more: bool,
    /// Where the next fetch should start.
    pub next_start: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: bool, next_start: usize) -> Self {
        Self {
            items,
            has_more,
            next_start,
        }
    }

    /// A terminal page with no items.
    #[cfg(test)]
    pub fn empty() -> Self {
        Self::new(Vec::new(), false, 0)
    }
}

/// A displayable row produced by the bundled sources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Entry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}
