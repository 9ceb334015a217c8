//! tua - incremental timeline archives
//!
//! This crate provides the core functionality for the `tua` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`timeline`] - Post model and the remote timeline client
//! - [`sync`] - Pagination, JSONL writing, and atomic archive updates
//! - [`config`] - Credentials and API configuration
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod sync;
pub mod timeline;

pub use error::{Error, Result};
