//! Timestamped plain-text report, one per batch.
//!
//! The writer is append-only: a header, then one block per image in the
//! order the images were processed. Nothing is ever read back.

use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{DescribeError, Result};

const RULE_WIDTH: usize = 80;

/// File name for a report started at `started_at`: `YYYYMMDD-HHMMSS.txt`.
pub fn report_file_name(started_at: &DateTime<Local>) -> String {
    format!("{}.txt", started_at.format("%Y%m%d-%H%M%S"))
}

/// Open report file for a single batch.
pub struct ReportWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ReportWriter {
    /// Create (or truncate) the report for a batch started at `started_at`
    /// inside `dir`. The directory must already exist.
    pub fn create(dir: &Path, started_at: &DateTime<Local>) -> Result<Self> {
        let path = dir.join(report_file_name(started_at));
        let file = File::create(&path).map_err(|e| {
            DescribeError::io(format!("Failed to create report {}", path.display()), e)
        })?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    /// Where this report lives on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the batch header: date, model and prompt.
    pub fn write_header(
        &mut self,
        started_at: &DateTime<Local>,
        model: &str,
        prompt: &str,
    ) -> Result<()> {
        let text = format!(
            "Image Analysis Results\nDate: {}\nModel: {}\nPrompt: {}\n{}\n\n",
            started_at.format("%Y-%m-%d %H:%M:%S"),
            model,
            prompt,
            "-".repeat(RULE_WIDTH),
        );
        self.write(&text)
    }

    /// Append the block for image number `index` (1-based).
    pub fn write_result(&mut self, index: usize, filename: &str, text: &str) -> Result<()> {
        let block = format!(
            "Image {}: {}\n{}\n{}\n\n",
            index,
            filename,
            text,
            "-".repeat(RULE_WIDTH),
        );
        self.write(&block)
    }

    /// Flush and close the report, returning its path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.out.flush().map_err(|e| {
            DescribeError::io(format!("Failed to write report {}", self.path.display()), e)
        })?;
        Ok(self.path)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).map_err(|e| {
            DescribeError::io(format!("Failed to write report {}", self.path.display()), e)
        })
    }
}
