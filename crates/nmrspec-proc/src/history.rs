//! Processing history
//!
//! Every step applied to a spectrum is recorded with:
//! - Sequential number
//! - Timestamp
//! - Operation name and description
//! - The step itself, so the history can be replayed as a pipeline
//!
//! The history can be exported as human-readable text or JSON.

use std::path::Path;

use chrono::{DateTime, Local};
use nmrspec_core::Result;
use serde::{Deserialize, Serialize};

use crate::pipeline::{Pipeline, ProcessingStep};

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based position in the session
    pub sequence: usize,
    pub timestamp: DateTime<Local>,
    pub operation: String,
    pub description: String,
    /// The step that produced this entry, if it came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<ProcessingStep>,
}

impl LogEntry {
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.description
        )
    }
}

/// Ordered record of the operations of one processing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingLog {
    pub session_id: String,
    pub session_start: DateTime<Local>,
    pub source_file: String,
    pub entries: Vec<LogEntry>,
}

impl Default for ProcessingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingLog {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            source_file: String::new(),
            entries: Vec::new(),
        }
    }

    pub fn set_source(&mut self, source: &str) {
        self.source_file = source.to_string();
    }

    /// Record a free-form operation.
    pub fn add_entry(&mut self, operation: &str, description: &str) {
        self.push(operation, description, None);
    }

    /// Record an applied processing step.
    pub fn add_step(&mut self, step: &ProcessingStep) {
        self.push(step.name(), &step.to_string(), Some(step.clone()));
    }

    fn push(&mut self, operation: &str, description: &str, step: Option<ProcessingStep>) {
        let seq = self.entries.len() + 1;
        self.entries.push(LogEntry {
            sequence: seq,
            timestamp: Local::now(),
            operation: operation.to_string(),
            description: description.to_string(),
            step,
        });
        log::info!("[LOG {:03}] {}: {}", seq, operation, description);
    }

    /// Remove the last entry (for undo).
    pub fn pop_entry(&mut self) -> Option<LogEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Steps of the recorded entries, in order, as a replayable pipeline.
    pub fn to_pipeline(&self) -> Pipeline {
        Pipeline::new(
            self.entries
                .iter()
                .filter_map(|e| e.step.clone())
                .collect(),
        )
    }

    pub fn to_text(&self) -> String {
        let rule = "=".repeat(63);
        let mut out = String::new();
        out.push_str(&rule);
        out.push_str("\n  NMR Processing Log\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("  Session ID:  {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:     {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        if !self.source_file.is_empty() {
            out.push_str(&format!("  Source:      {}\n", self.source_file));
        }
        out.push_str(&format!("  Operations:  {}\n", self.entries.len()));
        out.push_str(&"-".repeat(63));
        out.push_str("\n\n");

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_text(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
