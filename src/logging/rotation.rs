//! Date-stamped log files that follow the calendar day.

use super::error::{LogError, Result};
use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name used for the given day: `DD-MM-YYYY.log`.
#[must_use]
pub fn log_file_name(date: NaiveDate) -> String {
    format!("{}.log", date.format("%d-%m-%Y"))
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Rotation state: the open file, the name it was opened under and the
/// directory it lives in.
///
/// Owned by the consumer task for the lifetime of the pipeline.
#[derive(Debug)]
pub(crate) struct DailyFile {
    dir: PathBuf,
    name: String,
    writer: BufWriter<File>,
    opens: u32,
}

impl DailyFile {
    /// Open (or create) the file for `date` inside `dir`.
    ///
    /// The directory itself is never created.
    pub(crate) fn open(dir: &Path, date: NaiveDate) -> Result<Self> {
        let name = log_file_name(date);
        let path = dir.join(&name);
        let file = open_append(&path).map_err(|source| LogError::OpenLogFile {
            path: path.clone(),
            source,
        })?;
        info!("Writing logs to {}", path.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            name,
            writer: BufWriter::new(file),
            opens: 1,
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn path(&self) -> PathBuf {
        self.dir.join(self.name())
    }

    /// How many files this state has opened, the initial one included.
    pub(crate) fn opens(&self) -> u32 {
        self.opens
    }

    /// Append `line` to the file for `today`, rotating first if the day changed.
    pub(crate) fn write_line(&mut self, today: NaiveDate, line: &str) {
        self.rotate_to(today);
        if let Err(e) = writeln!(self.writer, "{line}") {
            warn!("Failed to write log line to {}: {e}", self.path().display());
        }
    }

    /// Switch to the file for `today` if it is not the one already open.
    ///
    /// The new file is opened before the old one is released; if opening
    /// fails the current handle stays in place and rotation is retried on the
    /// next write.
    fn rotate_to(&mut self, today: NaiveDate) {
        let name = log_file_name(today);
        if name == self.name {
            return;
        }
        let path = self.dir.join(&name);
        match open_append(&path) {
            Ok(file) => {
                let previous = std::mem::replace(&mut self.writer, BufWriter::new(file));
                Self::release(previous, &self.name);
                info!("Rotated log file from {} to {}", self.name, name);
                self.name = name;
                self.opens = self.opens.saturating_add(1);
            }
            Err(e) => {
                warn!(
                    "Failed to rotate log file to {}: {e}; still writing to {}",
                    path.display(),
                    self.name
                );
            }
        }
    }

    fn release(writer: BufWriter<File>, name: &str) {
        match writer.into_inner() {
            Ok(file) => drop(file),
            Err(e) => warn!("Failed to flush log file {name}: {}", e.error()),
        }
    }

    pub(crate) fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush log file {}: {e}", self.name);
        }
    }

    /// Flush and close the current file.
    pub(crate) fn close(self) {
        debug!(
            file = %self.name,
            opened = self.opens(),
            "Closing log file"
        );
        Self::release(self.writer, &self.name);
    }
}

#[cfg(test)]
#[path = "rotation_tests.rs"]
mod rotation_tests;
