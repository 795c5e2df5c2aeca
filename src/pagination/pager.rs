//! Lazy item sequences over a [`PageSource`]
//!
//! Both [`Pager`] (blocking iterator) and [`item_stream`] (async stream)
//! fetch the first page on first demand, fetch page N+1 only after page N is
//! exhausted, and stop after the first page without a cursor. A failed fetch
//! is yielded once and ends the sequence; items already yielded stay valid.

use super::types::{Page, PageSource};
use crate::error::{Error, Result};
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// Where the sequence stands between fetches
#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    NotStarted,
    Cursor(String),
    Exhausted,
}

impl Position {
    fn after<T>(page: &Page<T>) -> Self {
        page.cursor()
            .map_or(Position::Exhausted, |c| Position::Cursor(c.to_string()))
    }
}

async fn fetch<T>(source: &dyn PageSource<T>, position: &Position) -> Option<Result<Page<T>>> {
    let page = match position {
        Position::NotStarted => source.first_page().await,
        Position::Cursor(cursor) => source.next_page(cursor).await,
        Position::Exhausted => return None,
    };
    if let Ok(page) = &page {
        debug!(
            "fetched page with {} items (more: {})",
            page.len(),
            !page.is_last()
        );
    }
    Some(page)
}

/// Forward-only blocking iterator over every item of a listing
pub struct Pager<T> {
    source: Arc<dyn PageSource<T>>,
    handle: Handle,
    _owner: Option<Arc<dyn Send + Sync>>,
    buffer: VecDeque<T>,
    position: Position,
    pages_fetched: usize,
}

impl<T> Pager<T> {
    /// Drive `source` on the runtime behind `handle`
    pub fn new(source: Arc<dyn PageSource<T>>, handle: Handle) -> Self {
        Self {
            source,
            handle,
            _owner: None,
            buffer: VecDeque::new(),
            position: Position::NotStarted,
            pages_fetched: 0,
        }
    }

    /// Hold `owner` for as long as the pager lives, keeping the runtime
    /// behind `handle` from shutting down under it
    #[must_use]
    pub fn keep_alive(self, owner: Arc<dyn Send + Sync>) -> Self {
        Self {
            _owner: Some(owner),
            ..self
        }
    }

    /// Number of page requests issued so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<T> Iterator for Pager<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.position == Position::Exhausted {
                return None;
            }
            if Handle::try_current().is_ok() {
                self.position = Position::Exhausted;
                return Some(Err(Error::runtime(
                    "blocking pager advanced from inside an async runtime; use the stream form",
                )));
            }

            let fetched = self.handle.block_on(fetch(self.source.as_ref(), &self.position));
            self.pages_fetched += 1;
            match fetched {
                Some(Ok(page)) => {
                    self.position = Position::after(&page);
                    self.buffer.extend(page);
                }
                Some(Err(e)) => {
                    self.position = Position::Exhausted;
                    return Some(Err(e));
                }
                None => return None,
            }
        }
    }
}

impl<T> std::iter::FusedIterator for Pager<T> {}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("buffered", &self.buffer.len())
            .field("position", &self.position)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

/// Async counterpart of [`Pager`]
pub fn item_stream<T: Send + 'static>(
    source: Arc<dyn PageSource<T>>,
) -> impl Stream<Item = Result<T>> + Send {
    stream::try_unfold(
        (source, Position::NotStarted),
        |(source, position)| async move {
            match fetch(source.as_ref(), &position).await {
                None => Ok(None),
                Some(Err(e)) => Err(e),
                Some(Ok(page)) => {
                    let next = Position::after(&page);
                    Ok(Some((page, (source, next))))
                }
            }
        },
    )
    .map_ok(|page| stream::iter(page.into_iter().map(Ok::<T, Error>)))
    .try_flatten()
}
