//! Engine options. Plain serde-friendly data with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Join type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    #[serde(alias = "full")]
    Outer,
}

impl JoinType {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "outer" | "full" => Ok(JoinType::Outer),
            _ => Err(Error::InvalidArgument(format!("unknown join type: {}", s))),
        }
    }
}

/// Suffix appended to right-hand non-key columns whose name is already taken.
pub const DEFAULT_JOIN_SUFFIX: &str = "_right";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    pub how: JoinType,
    pub suffix: String,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            how: JoinType::Inner,
            suffix: DEFAULT_JOIN_SUFFIX.to_string(),
        }
    }
}

impl JoinOptions {
    pub fn new(how: JoinType) -> Self {
        Self {
            how,
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Load options from JSON, e.g. `{"how": "left", "suffix": "_r"}`.
    pub fn from_json(s: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            return Err(Error::Config("join suffix must not be empty".into()));
        }
        Ok(())
    }
}

/// Ordering of a sort. Nulls go last unless `nulls_last` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub descending: bool,
    pub nulls_last: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            descending: false,
            nulls_last: true,
        }
    }
}

impl SortOptions {
    pub fn descending() -> Self {
        Self {
            descending: true,
            ..Self::default()
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
