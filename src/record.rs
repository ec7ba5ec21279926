//! Record data model: the unit of extraction output
//!
//! A `Record` is built once by the extraction engine, handed to the record
//! store, and never mutated by the core afterwards. Access counting and tier
//! migration belong to whatever owns the store downstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed substitute content for any credential-like match. Raw secret values
/// are never stored.
pub const REDACTION_PLACEHOLDER: &str = "[REDACTED SECRET]";

/// Closed set of content categories a record can be classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Decision,
    Action,
    Learning,
    Gotcha,
    Error,
    Config,
    Email,
    Finance,
    Task,
    Contact,
    Project,
    Url,
    Github,
    Secret,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Decision => "decision",
            Category::Action => "action",
            Category::Learning => "learning",
            Category::Gotcha => "gotcha",
            Category::Error => "error",
            Category::Config => "config",
            Category::Email => "email",
            Category::Finance => "finance",
            Category::Task => "task",
            Category::Contact => "contact",
            Category::Project => "project",
            Category::Url => "url",
            Category::Github => "github",
            Category::Secret => "secret",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage priority partition; controls where a record is persisted and,
/// implicitly, retention policy upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Hot,
    Warm,
    Cold,
}

impl Tier {
    /// Directory name of the on-disk partition for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Hot => "hot",
            Tier::Warm => "warm",
            Tier::Cold => "cold",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted memory record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier: unix seconds plus a random suffix
    pub id: String,
    /// Content category
    pub category: Category,
    /// Matched text (trimmed), or [`REDACTION_PLACEHOLDER`] for secrets
    pub content: String,
    /// Short label describing why this record was created
    pub context: String,
    /// Storage tier, computed by [`crate::tier::classify`]
    pub tier: Tier,
    /// Creation time, "%Y-%m-%d %H:%M:%S" UTC
    pub created_at: String,
    /// Access counter, 0 at creation; mutation is a store concern
    pub access_count: u64,
    /// Free-text origin tag, e.g. "telegram"
    pub source_channel: String,
    /// Short labels for downstream search and filtering
    pub tags: Vec<String>,
}

/// Current timestamp in the sortable second-precision record format
pub fn record_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
