//! Result persistence: the local result file and the scheduled-job output channel

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DomainWatchError, Result};
use crate::types::format_timestamp;

/// Writes the outcome of a run where later tooling can pick it up
#[derive(Debug, Clone)]
pub struct ResultWriter {
    result_file: PathBuf,
    trigger_output: Option<PathBuf>,
}

impl ResultWriter {
    pub fn new(result_file: impl Into<PathBuf>, trigger_output: Option<PathBuf>) -> Self {
        Self {
            result_file: result_file.into(),
            trigger_output,
        }
    }

    pub fn result_file(&self) -> &Path {
        &self.result_file
    }

    /// Persist the domains found available in this run.
    ///
    /// The result file is only (over)written when there is something to report.
    pub fn write(&self, available: &[String], checked_at: &DateTime<Local>) -> Result<()> {
        if !available.is_empty() {
            self.write_result_file(available, checked_at)?;
        }
        self.write_trigger_output(available.len())
    }

    fn write_result_file(&self, available: &[String], checked_at: &DateTime<Local>) -> Result<()> {
        let mut content = format!("# 检测时间: {}\n", format_timestamp(checked_at));
        for domain in available {
            content.push_str(domain);
            content.push('\n');
        }

        fs::write(&self.result_file, content)
            .map_err(|e| DomainWatchError::from(e).at(&self.result_file))?;

        tracing::debug!(path = %self.result_file.display(), count = available.len(), "Result file written");
        Ok(())
    }

    fn write_trigger_output(&self, count: usize) -> Result<()> {
        let Some(path) = &self.trigger_output else {
            return Ok(());
        };

        let lines = if count > 0 {
            format!("available=true\ncount={}\n", count)
        } else {
            "available=false\n".to_string()
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| DomainWatchError::from(e).at(path))?;
        file.write_all(lines.as_bytes())
            .map_err(|e| DomainWatchError::from(e).at(path))?;

        tracing::debug!(path = %path.display(), count, "Trigger output appended");
        Ok(())
    }
}
