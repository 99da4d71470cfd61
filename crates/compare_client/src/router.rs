//! Slot resolution: routing incoming events back to the slots that asked.

use std::collections::{HashMap, VecDeque};

use compare_core::AUTO_MODEL;

use crate::stream::StreamRecord;

/// Classification of one framed record against the request's slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// The reported model matches a slot's exact requested identifier.
    Direct,
    /// The reported model was not explicitly requested; it answers the
    /// next unassigned auto slot.
    AutoResolution,
    /// The payload failed to decode.
    Unparseable,
}

/// The authoritative per-request mapping between requested identifiers,
/// slot indices and the auto pseudo-model. Built once per dispatch and
/// owned by the orchestrator for the request's duration.
///
/// Auto assignment is strictly FIFO over the slots that requested the
/// sentinel. The wire protocol carries no correlation id tying a resolved
/// model back to a specific requested slot, so queue order is a
/// best-effort heuristic, not a correctness guarantee.
#[derive(Debug)]
pub struct SlotTable {
    /// Non-auto requested identifier -> every slot index that requested it.
    reverse: HashMap<String, Vec<usize>>,
    /// Slot indices that requested the sentinel, in slot-index order. Each
    /// index appears at most once and is never re-queued.
    auto_queue: VecDeque<usize>,
}

impl SlotTable {
    pub fn new(models: &[String]) -> Self {
        let mut reverse: HashMap<String, Vec<usize>> = HashMap::new();
        let mut auto_queue = VecDeque::new();
        for (index, model) in models.iter().enumerate() {
            if model == AUTO_MODEL {
                auto_queue.push_back(index);
            } else {
                reverse.entry(model.clone()).or_default().push(index);
            }
        }
        SlotTable {
            reverse,
            auto_queue,
        }
    }

    pub fn classify(&self, record: &StreamRecord) -> EventClass {
        match &record.event {
            None => EventClass::Unparseable,
            Some(event) if self.reverse.contains_key(&event.model) => EventClass::Direct,
            Some(_) => EventClass::AutoResolution,
        }
    }

    /// Slot indices an event for `model` must update.
    ///
    /// Direct events fan out to every slot registered under the identifier.
    /// Auto-resolution events consume the queue head; an empty queue means
    /// a surplus or duplicate delivery, discarded without error.
    pub fn resolve(&mut self, class: EventClass, model: &str) -> Vec<usize> {
        match class {
            EventClass::Direct => self
                .reverse
                .get(model)
                .cloned()
                .unwrap_or_default(),
            EventClass::AutoResolution => match self.auto_queue.pop_front() {
                Some(index) => vec![index],
                None => {
                    log::debug!("discarding surplus auto-resolution event for {model}");
                    Vec::new()
                }
            },
            EventClass::Unparseable => Vec::new(),
        }
    }

    pub fn pending_auto_slots(&self) -> usize {
        self.auto_queue.len()
    }
}
