//! Keyword categorizer: coarse topical fallback
//!
//! When no pattern captures the gist of a message, a topic table of keyword
//! sets decides whether one summary record should be filed. Topics are
//! scanned in declaration order and the first hit wins, so a single
//! extraction call never produces more than one keyword-driven record.

use crate::record::{Category, Tier};

/// One topic: a category, its expected default tier, and the keywords that
/// trigger it
#[derive(Debug, Clone)]
pub struct Topic {
    pub name: &'static str,
    pub category: Category,
    pub default_tier: Tier,
    pub keywords: &'static [&'static str],
}

/// Ordered topic table. Declaration order is the scan order.
#[derive(Debug, Clone)]
pub struct TopicTable {
    topics: Vec<Topic>,
}

impl TopicTable {
    /// Built-in topic table
    pub fn default_topics() -> Self {
        Self {
            topics: vec![
                Topic {
                    name: "task",
                    category: Category::Task,
                    default_tier: Tier::Warm,
                    keywords: &["todo", "action", "task", "deadline", "reminder", "review", "check"],
                },
                Topic {
                    name: "project",
                    category: Category::Project,
                    default_tier: Tier::Warm,
                    keywords: &["project", "feature", "build", "deploy", "release", "version"],
                },
                Topic {
                    name: "error",
                    category: Category::Error,
                    default_tier: Tier::Hot,
                    keywords: &["error", "bug", "fix", "crash", "exception", "fail"],
                },
                Topic {
                    name: "decision",
                    category: Category::Decision,
                    default_tier: Tier::Warm,
                    keywords: &["decide", "decision", "choose", "pick", "vs", "versus"],
                },
                Topic {
                    name: "learning",
                    category: Category::Learning,
                    default_tier: Tier::Warm,
                    keywords: &["learn", "note", "tip", "how to", "best practice"],
                },
                Topic {
                    name: "contact",
                    category: Category::Contact,
                    default_tier: Tier::Warm,
                    keywords: &["contact", "email", "phone", "@", "ceo", "founder"],
                },
                Topic {
                    name: "finance",
                    category: Category::Finance,
                    default_tier: Tier::Hot,
                    keywords: &["money", "cost", "budget", "price", "invoice", "payment"],
                },
            ],
        }
    }

    /// Custom table, mainly for tests
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// First topic whose keyword set has a case-insensitive substring hit in
    /// the text. Later topics are not evaluated once one matches.
    pub fn match_topic(&self, text: &str) -> Option<&Topic> {
        let lower = text.to_lowercase();
        self.topics
            .iter()
            .find(|topic| topic.keywords.iter().any(|k| lower.contains(k)))
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}
