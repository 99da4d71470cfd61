use serde::{Deserialize, Serialize};

/// Delivery state of a single comparison slot.
///
/// A slot that is still `Pending` when the stream closes never received an
/// answer; the display layer must not confuse that with `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Pending,
    Fulfilled,
    Failed,
}

/// One logical comparison position configured by the user.
///
/// All fields besides `index` and `requested_model` start empty and are
/// filled in as events for this slot arrive. `resolved_model` only differs
/// from `requested_model` for slots that requested the auto sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub requested_model: String,
    pub state: SlotState,
    pub response: String,
    pub resolved_model: Option<String>,
    pub response_time_ms: Option<u64>,
    pub token_count: Option<usize>,
}

impl Slot {
    pub fn new(index: usize, requested_model: impl Into<String>) -> Self {
        Slot {
            index,
            requested_model: requested_model.into(),
            state: SlotState::Pending,
            response: String::new(),
            resolved_model: None,
            response_time_ms: None,
            token_count: None,
        }
    }
}

/// One processed event, as delivered to the display callback.
///
/// Carries the slot index directly so callers with duplicate requested
/// models can still tell updates apart; `requested_model` is kept for
/// callers keyed the old way. `resolved_model` mirrors the slot: `None`
/// when no server event ever named a model for it (e.g. the terminal
/// updates emitted on a connectivity failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUpdate {
    pub slot_index: usize,
    pub requested_model: String,
    pub resolved_model: Option<String>,
    pub text: String,
    pub is_error: bool,
    pub token_count: Option<usize>,
    pub response_time_ms: u64,
}
