//! Timeline client trait.
//!
//! The sync engine only needs one capability from the remote side: fetch a
//! newest-first page of posts for a query. Authentication and rate limiting
//! live behind the implementation.

use crate::error::Result;

use super::types::{Post, TimelineQuery};

/// Blocking source of timeline pages.
pub trait TimelineClient {
    /// Fetch one page of posts, newest first. An empty page means there is
    /// nothing left in the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails or returns malformed data.
    fn fetch_page(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>>;
}

impl<T: TimelineClient + ?Sized> TimelineClient for &T {
    fn fetch_page(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>> {
        (**self).fetch_page(query)
    }
}

impl<T: TimelineClient + ?Sized> TimelineClient for Box<T> {
    fn fetch_page(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>> {
        (**self).fetch_page(query)
    }
}
