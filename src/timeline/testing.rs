//! In-memory timeline clients for tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use serde_json::json;

use crate::error::{Error, Result};

use super::client::TimelineClient;
use super::types::{FetchWindow, Post, TimelineQuery};

pub(crate) fn post(id: u64) -> Post {
    Post::from_value(json!({"id": id, "text": format!("post {id}")})).unwrap()
}

/// Replays a fixed script of pages, recording every window it was asked for.
pub(crate) struct ScriptedTimeline {
    pages: RefCell<VecDeque<Result<Vec<Post>>>>,
    pub(crate) windows: RefCell<Vec<FetchWindow>>,
}

impl ScriptedTimeline {
    pub(crate) fn new(pages: Vec<Result<Vec<Post>>>) -> Self {
        Self {
            pages: RefCell::new(pages.into()),
            windows: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn from_ids(pages: &[&[u64]]) -> Self {
        Self::new(
            pages
                .iter()
                .map(|ids| Ok(ids.iter().copied().map(post).collect()))
                .collect(),
        )
    }

    pub(crate) fn calls(&self) -> usize {
        self.windows.borrow().len()
    }
}

impl TimelineClient for ScriptedTimeline {
    fn fetch_page(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>> {
        self.windows.borrow_mut().push(query.window);
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Fetch("script exhausted".to_string())))
    }
}

/// Serves a user's history the way the remote endpoint does: newest first,
/// honoring `since_id`, `max_id` and `count`.
pub(crate) struct SimulatedTimeline {
    ids: Vec<u64>,
    calls: Cell<usize>,
}

impl SimulatedTimeline {
    pub(crate) fn with_history(oldest: u64, newest: u64) -> Self {
        Self {
            ids: (oldest..=newest).rev().collect(),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TimelineClient for SimulatedTimeline {
    fn fetch_page(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>> {
        self.calls.set(self.calls.get() + 1);
        let window = query.window;
        Ok(self
            .ids
            .iter()
            .copied()
            .filter(|id| window.since_id.is_none_or(|since| *id > since))
            .filter(|id| window.max_id.is_none_or(|max| *id <= max))
            .take(window.page_size as usize)
            .map(post)
            .collect())
    }
}
