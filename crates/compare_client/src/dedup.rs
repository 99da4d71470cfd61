//! Suppression of repeat record deliveries.

use std::collections::HashSet;

use crate::router::EventClass;

/// Per-request duplicate filter.
///
/// The transport may redeliver an identical record (retried reads,
/// upstream replay). Direct and unparseable records are suppressed on
/// exact raw-content repeat; a record with different content for the same
/// model is a new, independent update. Auto-resolution records are never
/// deduplicated by content: the server may legitimately answer several
/// auto slots with identically-labeled events, so only exhaustion of the
/// auto queue bounds them.
#[derive(Debug, Default)]
pub struct DuplicateFilter {
    seen: HashSet<String>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record with this classification and raw content should be
    /// processed. Mutates the seen-set for content-deduplicated classes.
    pub fn admit(&mut self, class: EventClass, raw: &str) -> bool {
        match class {
            EventClass::AutoResolution => true,
            EventClass::Direct | EventClass::Unparseable => {
                let fresh = self.seen.insert(raw.to_string());
                if !fresh {
                    log::debug!("suppressing duplicate record: {raw}");
                }
                fresh
            }
        }
    }
}
