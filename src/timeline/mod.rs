//! Remote timeline access.
//!
//! - [`types`] - `Post`, `FetchWindow`, `TimelineQuery`
//! - [`client`] - the `TimelineClient` trait the sync engine depends on
//! - [`twitter`] - HTTP implementation against the v1.1 API

mod client;
#[cfg(test)]
pub(crate) mod testing;
mod twitter;
mod types;

pub use client::TimelineClient;
pub use twitter::{BlockingTimeline, TwitterApi};
pub use types::{FetchWindow, Post, TimelineQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
