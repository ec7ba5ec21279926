//! Record identifier generation
//!
//! Identifiers embed creation time plus a random suffix so two records built
//! in the same second still differ. Uniqueness across concurrent callers is
//! "extremely likely", not guaranteed; callers needing strict uniqueness
//! should post-validate.

use uuid::Uuid;

/// Identifier generation capability, injectable so tests can supply
/// deterministic ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production generator: `<unix-seconds>-<8 hex chars of a v4 uuid>`
#[derive(Debug, Default)]
pub struct WallClockIds;

impl IdGenerator for WallClockIds {
    fn next_id(&self) -> String {
        let seconds = chrono::Utc::now().timestamp();
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", seconds, &suffix[..8])
    }
}
