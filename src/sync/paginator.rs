//! Backward pagination over a timeline.
//!
//! Each page is requested with `max_id` set just below the last post of the
//! previous page, so pages never overlap and the walk ends on the first
//! empty page.

use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::timeline::{FetchWindow, Post, TimelineClient, TimelineQuery};

/// Lazy, finite stream of posts from one pagination run.
///
/// Yields `Err` at most once, after which the iterator is exhausted. Posts
/// already yielded are not retracted.
pub struct Paginator<'a, C: TimelineClient + ?Sized> {
    client: &'a C,
    screen_name: &'a str,
    window: FetchWindow,
    page: std::vec::IntoIter<Post>,
    pages_fetched: usize,
    done: bool,
}

impl<'a, C: TimelineClient + ?Sized> Paginator<'a, C> {
    pub fn new(client: &'a C, screen_name: &'a str, window: FetchWindow) -> Self {
        Self {
            client,
            screen_name,
            window,
            page: Vec::new().into_iter(),
            pages_fetched: 0,
            done: false,
        }
    }

    /// Number of fetch calls that returned a page (empty or not).
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page into the buffer. Returns `false` on an empty page.
    fn fetch_next_page(&mut self) -> Result<bool> {
        let query = TimelineQuery {
            screen_name: self.screen_name,
            window: self.window,
        };
        let page = self.client.fetch_page(&query).map_err(into_fetch_error)?;
        self.pages_fetched += 1;

        debug!(
            page = self.pages_fetched,
            records = page.len(),
            since_id = ?self.window.since_id,
            max_id = ?self.window.max_id,
            "Fetched timeline page"
        );

        let Some(last) = page.last() else {
            return Ok(false);
        };

        match last.id().checked_sub(1) {
            Some(next_max) => self.window.max_id = Some(next_max),
            // Nothing can be older than id 0.
            None => self.done = true,
        }
        self.page = page.into_iter();
        Ok(true)
    }
}

fn into_fetch_error(err: Error) -> Error {
    match err {
        Error::Fetch(_) | Error::Auth(_) => err,
        other => Error::Fetch(other.to_string()),
    }
}

impl<C: TimelineClient + ?Sized> Iterator for Paginator<'_, C> {
    type Item = Result<Post>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(post) = self.page.next() {
                if let Some(since_id) = self.window.since_id {
                    if post.id() <= since_id {
                        warn!(
                            id = post.id(),
                            since_id, "Timeline returned a post at or below since_id"
                        );
                    }
                }
                return Some(Ok(post));
            }

            if self.done {
                return None;
            }

            match self.fetch_next_page() {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<C: TimelineClient + ?Sized> FusedIterator for Paginator<'_, C> {}
