//! Timeline synchronization.
//!
//! This module keeps a newline-delimited JSON archive of an account's posts
//! in step with the remote timeline:
//!
//! - **Paginator**: walks the timeline backwards page by page
//! - **Sink**: writes one JSON object per line
//! - **Archiver**: full archives, and incremental updates that splice new
//!   posts ahead of an existing archive
//! - **File**: temp-file-and-rename helpers so archives are replaced
//!   atomically
//!
//! # File Format
//!
//! One post per line, newest first, exactly as the API returned it:
//! ```json
//! {"id":1050118621198921728,"created_at":"Wed Oct 10 20:19:24 +0000 2018","text":"...",...}
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tua::sync::Archiver;
//! use tua::timeline::FetchWindow;
//!
//! let archiver = Archiver::new(client, "someone", FetchWindow::new(false, false));
//! let stats = archiver.merge_update(Path::new("someone.jsonl"))?;
//! ```

mod file;
mod merge;
mod paginator;
mod sink;
mod types;

pub use file::{commit, count_lines, read_first_line, temp_file_beside};
pub use merge::Archiver;
pub use paginator::Paginator;
pub use sink::RecordSink;
pub use types::{SyncMode, SyncStats};
