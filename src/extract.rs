//! Extraction engine: text in, ordered records out
//!
//! Runs every enabled matcher over the input in a fixed order, applies the
//! cross-matcher overlap checks, deduplicates, and finishes with the keyword
//! fallback. Pure and synchronous: no IO, no shared mutable state, no error
//! path. Malformed input just yields fewer or zero records.

use crate::config::ExtractionConfig;
use crate::id::{IdGenerator, WallClockIds};
use crate::keywords::TopicTable;
use crate::patterns::{MatcherKind, MatcherSet, CODE_HOST_DOMAIN};
use crate::record::{record_timestamp, Category, Record, REDACTION_PLACEHOLDER};
use crate::tier;
use std::collections::HashSet;

/// Number of leading characters of content that form the dedup key
const DEDUP_PREFIX_CHARS: usize = 50;

/// Length cap for keyword summary records
const SUMMARY_CHARS: usize = 200;

/// Stack-trace frames beyond this count are dropped from the collapsed record
const MAX_STACK_FRAMES: usize = 3;

/// Orchestrates the pattern library and keyword categorizer over one message
pub struct ExtractionEngine {
    matchers: MatcherSet,
    topics: TopicTable,
    ids: Box<dyn IdGenerator>,
}

impl ExtractionEngine {
    pub fn new(matchers: MatcherSet, topics: TopicTable, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            matchers,
            topics,
            ids,
        }
    }

    /// Engine with every matcher family, the built-in topic table, and
    /// wall-clock identifiers
    pub fn with_defaults() -> crate::Result<Self> {
        Ok(Self::new(
            MatcherSet::all()?,
            TopicTable::default_topics(),
            Box::new(WallClockIds),
        ))
    }

    /// Extract all records from one message.
    ///
    /// Records come back in insertion order: matcher order, then match order
    /// within a matcher, then the keyword summary last. Within one call no
    /// two records share (category, first 50 chars of content).
    pub fn extract(&self, text: &str, source_channel: &str) -> Vec<Record> {
        let mut records: Vec<Record> = Vec::new();
        let mut seen: HashSet<(Category, String)> = HashSet::new();
        // Repo-link occurrences, used to suppress commit SHAs that are merely
        // the tail of a detected link
        let mut repo_links: Vec<String> = Vec::new();

        for matcher in self.matchers.iter() {
            match matcher.kind {
                MatcherKind::RepoLink => {
                    for hit in matcher.find_all(text) {
                        repo_links.push(hit.to_string());
                        self.push(&mut records, &mut seen, matcher.kind, hit, source_channel);
                    }
                }
                MatcherKind::CommitSha => {
                    for hit in matcher.find_all(text) {
                        if repo_links.iter().any(|link| link.contains(hit)) {
                            continue;
                        }
                        self.push(&mut records, &mut seen, matcher.kind, hit, source_channel);
                    }
                }
                MatcherKind::Url => {
                    for hit in matcher.find_all(text) {
                        if hit.contains(CODE_HOST_DOMAIN) {
                            continue;
                        }
                        self.push(&mut records, &mut seen, matcher.kind, hit, source_channel);
                    }
                }
                MatcherKind::Phone => {
                    for hit in matcher.find_all(text) {
                        let digits = hit.chars().filter(|c| c.is_ascii_digit()).count();
                        if digits >= 10 {
                            self.push(&mut records, &mut seen, matcher.kind, hit, source_channel);
                        }
                    }
                }
                MatcherKind::StackTrace => {
                    let frames = matcher.find_all(text);
                    if !frames.is_empty() {
                        let summary = frames
                            .iter()
                            .take(MAX_STACK_FRAMES)
                            .copied()
                            .collect::<Vec<_>>()
                            .join(" | ");
                        self.push(
                            &mut records,
                            &mut seen,
                            matcher.kind,
                            &summary,
                            source_channel,
                        );
                    }
                }
                _ => {
                    for hit in matcher.find_all(text) {
                        self.push(&mut records, &mut seen, matcher.kind, hit, source_channel);
                    }
                }
            }
        }

        // Keyword fallback: at most one summary record, same dedupe check
        if let Some(topic) = self.topics.match_topic(text) {
            let summary: String = text.chars().take(SUMMARY_CHARS).collect();
            self.push_record(
                &mut records,
                &mut seen,
                topic.category,
                &summary,
                format!("Auto-detected {} from conversation", topic.name),
                vec![topic.name.to_string(), "auto-detected".to_string()],
                source_channel,
            );
        }

        records
    }

    fn push(
        &self,
        records: &mut Vec<Record>,
        seen: &mut HashSet<(Category, String)>,
        kind: MatcherKind,
        content: &str,
        source_channel: &str,
    ) {
        // Redacting matchers never store the matched text
        let content = if kind.redact() {
            REDACTION_PLACEHOLDER
        } else {
            content
        };
        let tags = kind.tags().iter().map(|t| t.to_string()).collect();
        self.push_record(
            records,
            seen,
            kind.category(),
            content,
            kind.context().to_string(),
            tags,
            source_channel,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn push_record(
        &self,
        records: &mut Vec<Record>,
        seen: &mut HashSet<(Category, String)>,
        category: Category,
        content: &str,
        context: String,
        tags: Vec<String>,
        source_channel: &str,
    ) {
        let content = content.trim();
        let prefix: String = content.chars().take(DEDUP_PREFIX_CHARS).collect();
        if !seen.insert((category, prefix)) {
            return;
        }

        records.push(Record {
            id: self.ids.next_id(),
            category,
            content: content.to_string(),
            context,
            tier: tier::classify(category, content),
            created_at: record_timestamp(),
            access_count: 0,
            source_channel: source_channel.to_string(),
            tags,
        });
    }
}

/// Caller-boundary gates in front of the engine: the master switch and the
/// minimum message length. Sub-minimum or disabled input yields the empty
/// sequence without reaching `extract`.
pub fn scan_message(
    extraction: &ExtractionConfig,
    engine: &ExtractionEngine,
    text: &str,
    source_channel: &str,
) -> Vec<Record> {
    if !extraction.enabled {
        tracing::debug!("Extraction is disabled, skipping message");
        return Vec::new();
    }
    if text.chars().count() < extraction.min_length {
        tracing::debug!(
            "Message shorter than {} chars, skipping",
            extraction.min_length
        );
        return Vec::new();
    }
    engine.extract(text, source_channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::testing::SequenceIds;
    use crate::record::Tier;

    fn engine() -> ExtractionEngine {
        ExtractionEngine::new(
            MatcherSet::all().unwrap(),
            TopicTable::default_topics(),
            Box::new(SequenceIds::default()),
        )
    }

    #[test]
    fn test_empty_and_nonsense_input() {
        let eng = engine();
        assert!(eng.extract("", "telegram").is_empty());
        assert!(eng.extract("¯\\_(ツ)_/¯", "telegram").is_empty());
    }

    #[test]
    fn test_single_email() {
        let eng = engine();
        let records = eng.extract("Reach me at jane@example.com", "telegram");
        // email record plus the contact keyword summary ("email", "@")
        let email = records
            .iter()
            .find(|r| r.category == Category::Email)
            .unwrap();
        assert_eq!(email.content, "jane@example.com");
        assert_eq!(email.tier, Tier::Warm);
        assert_eq!(email.context, "Contact email");
        assert_eq!(email.source_channel, "telegram");
        assert_eq!(email.access_count, 0);
    }

    #[test]
    fn test_repo_link_not_double_counted_as_url() {
        let eng = engine();
        let records = eng.extract("See https://github.com/acme/widget for code", "cli");
        let github: Vec<_> = records
            .iter()
            .filter(|r| r.category == Category::Github)
            .collect();
        assert_eq!(github.len(), 1);
        assert_eq!(github[0].tier, Tier::Cold);
        assert!(!records.iter().any(|r| r.category == Category::Url));
    }

    #[test]
    fn test_commit_sha_in_commit_url_survives() {
        let sha = "d6cd1e2bd19e03a81132a23b2025920577f84e37";
        let eng = engine();
        // The repo-link match stops at /owner/repo, so the sha in the commit
        // path is not part of a detected link occurrence and is kept.
        let text = format!("fixed in https://github.com/acme/widget/commit/{}", sha);
        let records = eng.extract(&text, "cli");
        let shas: Vec<_> = records
            .iter()
            .filter(|r| r.context == "Git commit SHA")
            .collect();
        assert_eq!(shas.len(), 1);
        assert_eq!(shas[0].content, sha);
    }

    #[test]
    fn test_commit_sha_suppressed_when_inside_detected_link() {
        let sha = "d6cd1e2bd19e03a81132a23b2025920577f84e37";
        let eng = engine();
        // Here the sha is the repo segment itself, so the detected link
        // occurrence contains it and the standalone sha record is dropped.
        let text = format!("see https://github.com/acme/{}", sha);
        let records = eng.extract(&text, "cli");
        assert!(records.iter().any(|r| r.context == "GitHub repository"));
        assert!(!records.iter().any(|r| r.context == "Git commit SHA"));
    }

    #[test]
    fn test_bare_commit_sha() {
        // The digit run inside the sha also trips the phone matcher, so
        // assert on the sha record itself rather than the record count.
        let sha = "d6cd1e2bd19e03a81132a23b2025920577f84e37";
        let eng = engine();
        let records = eng.extract(&format!("reverted {}", sha), "cli");
        let shas: Vec<_> = records
            .iter()
            .filter(|r| r.context == "Git commit SHA")
            .collect();
        assert_eq!(shas.len(), 1);
        assert_eq!(shas[0].category, Category::Github);
        assert_eq!(shas[0].content, sha);
    }

    #[test]
    fn test_secret_is_redacted() {
        let eng = engine();
        let records = eng.extract("API_KEY: sk_live_abcdefghijklmno123456", "cli");
        let secret = records
            .iter()
            .find(|r| r.category == Category::Secret)
            .unwrap();
        assert_eq!(secret.content, REDACTION_PLACEHOLDER);
        assert_eq!(secret.tier, Tier::Hot);
        assert!(!records
            .iter()
            .any(|r| r.content.contains("sk_live_abcdefghijklmno123456")));
    }

    #[test]
    fn test_stack_frames_collapse_to_one_record() {
        let eng = engine();
        let text = "crash: at a.Foo (F.java:1) at a.Bar (B.java:2) at a.Baz (Z.java:3) at a.Qux (Q.java:4)";
        let records = eng.extract(text, "cli");
        let frames: Vec<_> = records
            .iter()
            .filter(|r| r.context == "Error stacktrace")
            .collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tier, Tier::Hot);
        assert_eq!(frames[0].content.matches(" | ").count(), 2);
        assert!(!frames[0].content.contains("Qux"));
    }

    #[test]
    fn test_phone_digit_filter() {
        let eng = engine();
        let records = eng.extract("call +1 (555) 123-4567 today", "cli");
        let phone = records
            .iter()
            .find(|r| r.context == "Phone number")
            .unwrap();
        assert_eq!(phone.category, Category::Contact);

        // Long separator run with too few digits is not a phone number
        let records = eng.extract("scores: 1 - 2 - 3 - 4 - 5", "cli");
        assert!(!records.iter().any(|r| r.context == "Phone number"));
    }

    #[test]
    fn test_dedup_by_category_and_prefix() {
        let eng = engine();
        let records = eng.extract(
            "ping jane@example.com and again jane@example.com",
            "cli",
        );
        let emails: Vec<_> = records
            .iter()
            .filter(|r| r.category == Category::Email)
            .collect();
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_keyword_summary_is_last_and_single() {
        let eng = engine();
        let text = "Invoice due $1,250.00, deadline tomorrow";
        let records = eng.extract(text, "cli");
        let finance = records
            .iter()
            .find(|r| r.category == Category::Finance && r.context == "Financial information")
            .unwrap();
        assert_eq!(finance.tier, Tier::Hot);
        assert!(records.iter().any(|r| r.category == Category::Task));

        // topic scan: task ("deadline") wins over finance ("invoice")
        let summaries: Vec<_> = records
            .iter()
            .filter(|r| r.tags.contains(&"auto-detected".to_string()))
            .collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].category, Category::Task);
        assert_eq!(summaries[0].id, records.last().unwrap().id);
    }

    #[test]
    fn test_ordering_is_stable_across_runs() {
        let eng = engine();
        let text = "mail a@b.co, see https://example.com/x, pay $10, deadline today";
        let a: Vec<_> = eng
            .extract(text, "cli")
            .into_iter()
            .map(|r| (r.category, r.content))
            .collect();
        let b: Vec<_> = eng
            .extract(text, "cli")
            .into_iter()
            .map(|r| (r.category, r.content))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identifiers_are_fresh_per_record() {
        let eng = engine();
        let records = eng.extract("mail a@b.co and c@d.io", "cli");
        assert_eq!(records[0].id, "test-0000");
        assert_eq!(records[1].id, "test-0001");
    }

    #[test]
    fn test_disabled_families_produce_nothing() {
        let eng = ExtractionEngine::new(
            MatcherSet::with_kinds(&[MatcherKind::Money]).unwrap(),
            TopicTable::new(vec![]),
            Box::new(SequenceIds::default()),
        );
        let records = eng.extract("mail a@b.co, pay $10 now", "cli");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, Category::Finance);
    }

    #[test]
    fn test_sub_minimum_input_yields_nothing() {
        let eng = engine();
        let extraction = ExtractionConfig::default();
        // "$5 x" carries a money hit but is only 4 chars, under the 5-char
        // minimum
        assert!(scan_message(&extraction, &eng, "$5 x", "cli").is_empty());
        assert!(scan_message(&extraction, &eng, "", "cli").is_empty());
        // at the minimum the gate opens
        assert!(!scan_message(&extraction, &eng, "$5 xx", "cli").is_empty());
    }

    #[test]
    fn test_disabled_extraction_yields_nothing() {
        let eng = engine();
        let extraction = ExtractionConfig {
            enabled: false,
            ..ExtractionConfig::default()
        };
        assert!(scan_message(&extraction, &eng, "mail jane@example.com", "cli").is_empty());
    }

    #[test]
    fn test_distinct_secrets_collapse_to_one_redacted_record() {
        let eng = engine();
        let records = eng.extract(
            "API_KEY: sk_live_abcdefghijklmno123456 and token=tok_zyxwvutsrqponml987654",
            "cli",
        );
        // Both matches redact to the placeholder, so the dedupe key collapses
        // them into a single secret record.
        let secrets: Vec<_> = records
            .iter()
            .filter(|r| r.category == Category::Secret)
            .collect();
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].content, REDACTION_PLACEHOLDER);
        assert!(!records.iter().any(|r| r.content.contains("sk_live")
            || r.content.contains("tok_zyxwvutsrqponml987654")));
    }

    #[test]
    fn test_multibyte_prefix_is_char_safe() {
        let eng = engine();
        // 60 multibyte chars followed by a task keyword; the 50-char dedup
        // prefix and 200-char summary must cut on char boundaries.
        let text = format!("{} deadline", "é".repeat(60));
        let records = eng.extract(&text, "cli");
        assert!(!records.is_empty());
    }
}
