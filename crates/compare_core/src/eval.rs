//! Post-run evaluation summary.

use serde::{Deserialize, Serialize};

use crate::slot::{Slot, SlotState};

/// Per-slot metrics row for the evaluation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub slot_index: usize,
    pub model: String,
    pub response_time_ms: Option<u64>,
    pub token_count: Option<usize>,
    pub state: SlotState,
}

/// Summary of one comparison run.
///
/// `best_model` is the resolved model of the fulfilled slot with the lowest
/// response time, ties broken by fewer output tokens; `None` when no slot
/// fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub rows: Vec<EvaluationRow>,
    pub best_model: Option<String>,
}

impl EvaluationSummary {
    pub fn from_slots(slots: &[Slot]) -> Self {
        let rows = slots
            .iter()
            .map(|slot| EvaluationRow {
                slot_index: slot.index,
                model: slot
                    .resolved_model
                    .clone()
                    .unwrap_or_else(|| slot.requested_model.clone()),
                response_time_ms: slot.response_time_ms,
                token_count: slot.token_count,
                state: slot.state,
            })
            .collect();

        let best_model = slots
            .iter()
            .filter(|slot| slot.state == SlotState::Fulfilled)
            .min_by_key(|slot| {
                (
                    slot.response_time_ms.unwrap_or(u64::MAX),
                    slot.token_count.unwrap_or(usize::MAX),
                )
            })
            .map(|slot| {
                slot.resolved_model
                    .clone()
                    .unwrap_or_else(|| slot.requested_model.clone())
            });

        EvaluationSummary { rows, best_model }
    }
}
