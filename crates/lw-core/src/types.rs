//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty after trimming whitespace.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Unknown export format name.
    #[error("invalid export format: {value} (expected json or csv)")]
    InvalidExportFormat { value: String },
}

/// A validated lap label.
///
/// Labels are stored trimmed and are never empty. Comparisons are exact
/// (case-sensitive), which is what per-label aggregation relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LapLabel(String);

impl LapLabel {
    /// Creates a new label after trimming and validation.
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "lap label" });
        }
        if trimmed.len() == label.len() {
            return Ok(Self(label));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The label given to the lap with this 1-based sequence number when the
    /// caller supplies none.
    pub fn numbered(sequence_number: usize) -> Self {
        Self(format!("Lap {sequence_number}"))
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match used by lap search.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.0.to_lowercase().contains(needle_lowercase)
    }
}

impl TryFrom<String> for LapLabel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LapLabel> for String {
    fn from(label: LapLabel) -> Self {
        label.0
    }
}

impl fmt::Display for LapLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
