//! Memsift - message entity scanner with a tiered memory store
//!
//! Scans free-form text for recognizable entities (emails, URLs, code
//! references, financial figures, dates, secrets, ...), classifies each
//! detection into a content category and a hot/warm/cold storage tier,
//! deduplicates, and persists one JSON record per detection.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod id;
pub mod keywords;
pub mod patterns;
pub mod record;
pub mod storage;
pub mod tier;

pub use error::{MemsiftError, Result};
pub use extract::{scan_message, ExtractionEngine};
pub use record::{Category, Record, Tier, REDACTION_PLACEHOLDER};
