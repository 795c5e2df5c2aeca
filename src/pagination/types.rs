//! Pagination types and traits
//!
//! Defines the page container, the layout used to find items and the
//! continuation cursor in a response body, and the source trait pagers pull
//! pages from.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of a listing.
///
/// Invariant: a cursor is present exactly when more pages may exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a page; a blank cursor is treated as absent
    pub fn new(items: Vec<T>, cursor: Option<String>) -> Self {
        Self {
            items,
            cursor: cursor.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Create a terminal page
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Continuation cursor for the next page
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Check if this is the terminal page
    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.cursor)
    }

    /// Convert every item, keeping the cursor; stops at the first failure
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> std::result::Result<U, E>) -> std::result::Result<Page<U>, E> {
        let items = self
            .items
            .into_iter()
            .map(f)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            cursor: self.cursor,
        })
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Where items and the continuation cursor live in a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Path to the item array (dotted path or JSONPath starting with `$`)
    pub items_path: String,
    /// Path to the continuation cursor
    pub cursor_path: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            items_path: "value".to_string(),
            cursor_path: "odata.nextLink".to_string(),
        }
    }
}

impl PageLayout {
    pub fn new(items_path: impl Into<String>, cursor_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
            cursor_path: cursor_path.into(),
        }
    }
}

/// Produces the pages of one listing, in order
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Fetch the first page
    async fn first_page(&self) -> Result<Page<T>>;

    /// Fetch the page named by `cursor`
    async fn next_page(&self, cursor: &str) -> Result<Page<T>>;
}
