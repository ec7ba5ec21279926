//! Pattern library for entity detection
//!
//! One pre-compiled regex matcher per entity family. Matchers scan the full
//! input independently and are mutually non-exclusive; the extraction engine
//! owns the ordering and cross-checks that resolve overlaps. A matcher never
//! fails on input text, zero matches is the normal "nothing detected" outcome.

use crate::error::{MemsiftError, Result};
use crate::record::Category;
use regex::Regex;

/// Code-hosting domain recognized by the repo-link matcher; generic URL
/// matches containing it are suppressed
pub const CODE_HOST_DOMAIN: &str = "github.com";

/// Entity families, in the fixed extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    Email,
    RepoLink,
    CommitSha,
    Url,
    Money,
    Phone,
    Date,
    ConfigPath,
    StackTrace,
    Credential,
}

/// Fixed extraction order applied by the engine. The repo-link / commit-sha /
/// url precedence is heuristic and order-dependent; it is kept as-is on
/// purpose.
pub const EXTRACTION_ORDER: [MatcherKind; 10] = [
    MatcherKind::Email,
    MatcherKind::RepoLink,
    MatcherKind::CommitSha,
    MatcherKind::Url,
    MatcherKind::Money,
    MatcherKind::Phone,
    MatcherKind::Date,
    MatcherKind::ConfigPath,
    MatcherKind::StackTrace,
    MatcherKind::Credential,
];

impl MatcherKind {
    fn pattern(&self) -> &'static str {
        match self {
            MatcherKind::Email => r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            MatcherKind::RepoLink => {
                r"https?://(?:www\.)?github\.com/[A-Za-z0-9-]+/[A-Za-z0-9._-]+"
            }
            MatcherKind::CommitSha => r"\b[a-f0-9]{40}\b",
            MatcherKind::Url => r#"https?://[^\s<>"{}|\\^`\[\]]+"#,
            MatcherKind::Money => {
                r"(?i)[$€£¥]\s?[\d,]+(?:\.\d{2})?|(?:USD|EUR|GBP|BTC|ETH)\s?[\d,]+"
            }
            MatcherKind::Phone => r"\+?[\d\s\-()]{10,}",
            MatcherKind::Date => {
                r"(?i)\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{2,4}|today|tomorrow|next week|deadline"
            }
            MatcherKind::ConfigPath => {
                r"\.?[A-Za-z0-9_/-]+\.(?:json|yaml|yml|ts|js|env|config|mjs|cjs)\b"
            }
            MatcherKind::StackTrace => r"at\s+[A-Za-z$_.<>]+\s+\([^)]+\)",
            MatcherKind::Credential => {
                r"(?i)(?:api[_-]?key|token|secret|password|auth)\s*[:=]\s*[A-Za-z0-9_-]{20,}"
            }
        }
    }

    /// Category assigned to records produced by this matcher
    pub fn category(&self) -> Category {
        match self {
            MatcherKind::Email => Category::Email,
            MatcherKind::RepoLink | MatcherKind::CommitSha => Category::Github,
            MatcherKind::Url => Category::Url,
            MatcherKind::Money => Category::Finance,
            MatcherKind::Phone => Category::Contact,
            MatcherKind::Date => Category::Task,
            MatcherKind::ConfigPath => Category::Config,
            MatcherKind::StackTrace => Category::Error,
            MatcherKind::Credential => Category::Secret,
        }
    }

    /// Human-readable context label stored on each record
    pub fn context(&self) -> &'static str {
        match self {
            MatcherKind::Email => "Contact email",
            MatcherKind::RepoLink => "GitHub repository",
            MatcherKind::CommitSha => "Git commit SHA",
            MatcherKind::Url => "Reference URL",
            MatcherKind::Money => "Financial information",
            MatcherKind::Phone => "Phone number",
            MatcherKind::Date => "Date/timeline reference",
            MatcherKind::ConfigPath => "Configuration file",
            MatcherKind::StackTrace => "Error stacktrace",
            MatcherKind::Credential => "API key or secret detected - redacted for security",
        }
    }

    /// Search tags attached to records from this matcher
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            MatcherKind::Email => &["contact", "email"],
            MatcherKind::RepoLink => &["code", "repo"],
            MatcherKind::CommitSha => &["code", "commit"],
            MatcherKind::Url => &["link", "reference"],
            MatcherKind::Money => &["money", "financial"],
            MatcherKind::Phone => &["contact", "phone"],
            MatcherKind::Date => &["timeline", "schedule"],
            MatcherKind::ConfigPath => &["file", "config"],
            MatcherKind::StackTrace => &["debug", "error", "stacktrace"],
            MatcherKind::Credential => &["security", "credential"],
        }
    }

    /// Whether matched content must be replaced with the redaction
    /// placeholder before it is stored
    pub fn redact(&self) -> bool {
        matches!(self, MatcherKind::Credential)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatcherKind::Email => "email",
            MatcherKind::RepoLink => "repo_link",
            MatcherKind::CommitSha => "commit_sha",
            MatcherKind::Url => "url",
            MatcherKind::Money => "money",
            MatcherKind::Phone => "phone",
            MatcherKind::Date => "date",
            MatcherKind::ConfigPath => "config_path",
            MatcherKind::StackTrace => "stack_trace",
            MatcherKind::Credential => "credential",
        }
    }
}

/// Single compiled entity matcher
#[derive(Debug, Clone)]
pub struct Matcher {
    pub kind: MatcherKind,
    pub regex: Regex,
}

impl Matcher {
    fn compile(kind: MatcherKind) -> Result<Self> {
        let regex = Regex::new(kind.pattern()).map_err(|e| MemsiftError::Pattern {
            matcher: kind.name().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { kind, regex })
    }

    /// All match texts in the input, in match order
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Immutable set of compiled matchers, kept in extraction order
#[derive(Debug, Clone)]
pub struct MatcherSet {
    matchers: Vec<Matcher>,
}

impl MatcherSet {
    /// Compile every matcher family
    pub fn all() -> Result<Self> {
        Self::with_kinds(&EXTRACTION_ORDER)
    }

    /// Compile a subset of matcher families. Extraction order is canonical
    /// regardless of the order kinds are listed in.
    pub fn with_kinds(kinds: &[MatcherKind]) -> Result<Self> {
        let matchers = EXTRACTION_ORDER
            .iter()
            .filter(|k| kinds.contains(k))
            .map(|&k| Matcher::compile(k))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.matchers.iter()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
