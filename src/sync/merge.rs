//! Full and incremental archive runs.
//!
//! An incremental update reads the newest post already on disk, fetches
//! everything newer, and rewrites the archive as
//! `[new posts] ++ [old file, byte for byte]` via a temp file and an atomic
//! rename. Nothing touches the original file until the rename.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::timeline::{FetchWindow, Post, TimelineClient};

use super::file::{commit, read_first_line, temp_file_beside};
use super::paginator::Paginator;
use super::sink::RecordSink;
use super::types::{SyncMode, SyncStats};

/// Archives one account's timeline through a [`TimelineClient`].
pub struct Archiver<C: TimelineClient> {
    client: C,
    screen_name: String,
    window: FetchWindow,
}

impl<C: TimelineClient> Archiver<C> {
    /// `window` supplies the page size and filters; its cursor is reset for
    /// every run.
    pub fn new(client: C, screen_name: impl Into<String>, window: FetchWindow) -> Self {
        Self {
            client,
            screen_name: screen_name.into(),
            window,
        }
    }

    /// Start a pagination run with the given window.
    pub fn paginate(&self, window: FetchWindow) -> Paginator<'_, C> {
        Paginator::new(&self.client, &self.screen_name, window)
    }

    /// Write the whole available history to `out`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` if a page request fails and `Io`/`Json` if writing
    /// fails. Records written before the failure stay written.
    pub fn archive_all<W: Write>(&self, out: W) -> Result<SyncStats> {
        info!(user = %self.screen_name, "Archiving full timeline");

        let mut stats = SyncStats::new(SyncMode::Full);
        let mut sink = RecordSink::new(out);
        self.drain(self.window.unbounded(), &mut sink, &mut stats)?;
        sink.into_inner()?;

        info!(records = stats.records, pages = stats.pages, "Full archive complete");
        Ok(stats)
    }

    /// Write the whole available history to `path`, replacing it atomically.
    ///
    /// # Errors
    ///
    /// As [`archive_all`](Self::archive_all); on any error `path` is left as
    /// it was and the temp file is removed.
    pub fn archive_to_file(&self, path: &Path) -> Result<SyncStats> {
        let mut temp = temp_file_beside(path)?;
        let stats = self.archive_all(BufWriter::new(temp.as_file_mut()))?;
        commit(temp, path)?;

        debug!(path = %path.display(), "Archive written");
        Ok(stats)
    }

    /// Prepend everything newer than the archive's first record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `path` cannot be opened or is empty
    /// - `Parse` if its first line has no integer `id`
    /// - `Fetch` if a page request fails
    /// - `Io`/`Json` if writing or the final rename fails
    ///
    /// On any error the archive is unchanged and the temp file is removed.
    pub fn merge_update(&self, path: &Path) -> Result<SyncStats> {
        let file = File::open(path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "Cannot open archive");
            Error::NotFound {
                path: path.to_path_buf(),
            }
        })?;
        let mut reader = BufReader::new(file);

        let first_line = read_first_line(&mut reader)
            .map_err(|e| {
                debug!(path = %path.display(), error = %e, "Cannot read archive");
                Error::NotFound {
                    path: path.to_path_buf(),
                }
            })?
            .ok_or_else(|| Error::NotFound {
                path: path.to_path_buf(),
            })?;
        let since_id = Post::from_line(&first_line)
            .map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .id();

        info!(user = %self.screen_name, since_id, path = %path.display(), "Updating archive");

        let mut stats = SyncStats::new(SyncMode::Update);
        stats.since_id = Some(since_id);

        let mut temp = temp_file_beside(path)?;
        {
            let mut sink = RecordSink::new(BufWriter::new(temp.as_file_mut()));
            self.drain(self.window.since(since_id), &mut sink, &mut stats)?;

            let mut out = sink.into_inner()?;
            out.write_all(&first_line)?;
            io::copy(&mut reader, &mut out)?;
            out.flush()?;
        }
        drop(reader);

        commit(temp, path)?;

        info!(records = stats.records, pages = stats.pages, "Archive updated");
        Ok(stats)
    }

    fn drain<W: Write>(
        &self,
        window: FetchWindow,
        sink: &mut RecordSink<W>,
        stats: &mut SyncStats,
    ) -> Result<()> {
        let mut paginator = self.paginate(window);
        let result = paginator.by_ref().try_for_each(|post| {
            let post = post?;
            sink.write(&post)?;
            stats.record(&post);
            Ok(())
        });
        stats.pages = paginator.pages_fetched();
        result
    }
}
