//! Timeline data types.
//!
//! A [`Post`] is kept as the untransformed JSON object the API returned; only
//! its `id` is ever interpreted. A [`FetchWindow`] holds the cursor state of
//! one pagination run and [`TimelineQuery`] pairs it with the account name to
//! produce wire parameters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Default number of posts requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Largest page the timeline endpoint will serve.
pub const MAX_PAGE_SIZE: u32 = 200;

/// A single timeline post, persisted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    id: u64,
    raw: Value,
}

impl Post {
    /// Wrap a raw JSON value, extracting its `id`.
    ///
    /// # Errors
    ///
    /// Returns a message if the value is not an object with a non-negative
    /// integer `id`.
    pub fn from_value(raw: Value) -> std::result::Result<Self, String> {
        let id = match raw.get("id") {
            Some(id) => id
                .as_u64()
                .ok_or_else(|| format!("`id` is not an unsigned integer: {id}"))?,
            None => return Err("record has no `id` field".to_string()),
        };
        Ok(Self { id, raw })
    }

    /// Parse one serialized record line (trailing newline allowed).
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a JSON object with an integer `id`.
    pub fn from_line(line: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(line)
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Serialize for Post {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Post {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(serde::de::Error::custom)
    }
}

/// Cursor and filter state for one pagination run.
///
/// `since_id` is an exclusive lower bound and `max_id` an inclusive upper
/// bound; `None` leaves the side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub page_size: u32,
    pub exclude_retweets: bool,
    pub exclude_replies: bool,
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            since_id: None,
            max_id: None,
            page_size: DEFAULT_PAGE_SIZE,
            exclude_retweets: false,
            exclude_replies: false,
        }
    }
}

impl FetchWindow {
    /// An unbounded window with the given filters.
    #[must_use]
    pub fn new(exclude_retweets: bool, exclude_replies: bool) -> Self {
        Self {
            exclude_retweets,
            exclude_replies,
            ..Self::default()
        }
    }

    /// Set the requested page size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `1 <= page_size <= MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidArgument(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Same filters, fresh cursor: no lower or upper bound.
    #[must_use]
    pub fn unbounded(self) -> Self {
        Self {
            since_id: None,
            max_id: None,
            ..self
        }
    }

    /// Same filters, fresh cursor, only posts newer than `since_id`.
    #[must_use]
    pub fn since(self, since_id: u64) -> Self {
        Self {
            since_id: Some(since_id),
            ..self.unbounded()
        }
    }
}

/// One page request: whose timeline, and which window of it.
#[derive(Debug, Clone, Copy)]
pub struct TimelineQuery<'a> {
    pub screen_name: &'a str,
    pub window: FetchWindow,
}

impl TimelineQuery<'_> {
    /// Query-string parameters for the `user_timeline` endpoint.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("screen_name", self.screen_name.to_string()),
            ("count", self.window.page_size.to_string()),
            ("include_rts", (!self.window.exclude_retweets).to_string()),
            ("exclude_replies", self.window.exclude_replies.to_string()),
        ];
        if let Some(since_id) = self.window.since_id {
            params.push(("since_id", since_id.to_string()));
        }
        if let Some(max_id) = self.window.max_id {
            params.push(("max_id", max_id.to_string()));
        }
        params
    }
}
