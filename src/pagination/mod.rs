//! Pagination module
//!
//! Cursor-based continuation over list responses.
//!
//! # Overview
//!
//! A listing is a chain of [`Page`]s. Each page carries an opaque cursor
//! when more pages may exist; the cursor alone tells the server where to
//! resume. [`Pager`] and [`item_stream`] flatten the chain into a lazy,
//! forward-only sequence of items, pulling pages from a [`PageSource`] one
//! at a time.

mod extract;
mod pager;
mod types;

pub use extract::lookup;
pub use pager::{item_stream, Pager};
pub use types::{Page, PageLayout, PageSource};
