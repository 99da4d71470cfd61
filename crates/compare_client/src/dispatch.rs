//! Dispatch orchestrator: one multiplexed request, one reconciled stream.

use std::time::Instant;

use futures_util::StreamExt;
use log::{debug, info, warn};
use serde::Serialize;

use compare_core::{estimate_tokens, Config, EvaluationSummary, Slot, SlotState, SlotUpdate};

use crate::dedup::DuplicateFilter;
use crate::error::{DispatchError, Result};
use crate::router::SlotTable;
use crate::stream::record_stream;

const CONNECTIVITY_ERROR: &str = "Unable to reach the comparison server";

/// Phase of one dispatch. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    AwaitingHeaders,
    Streaming,
    Completed,
    Failed,
}

fn transition(phase: &mut DispatchPhase, next: DispatchPhase) {
    debug!("dispatch phase {phase:?} -> {next:?}");
    *phase = next;
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    prompt: &'a str,
    models: &'a [String],
}

/// Final state of a completed dispatch.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// Final slots, in request order. A slot still `Pending` here never
    /// received an answer.
    pub slots: Vec<Slot>,
    pub evaluation: EvaluationSummary,
    pub events_processed: usize,
}

/// Drives one request at a time: builds the outbound request from the slot
/// selections, owns the slot table and duplicate filter for the request's
/// duration, and invokes the display callback once per resolved update,
/// synchronously in arrival order.
///
/// Everything is created fresh per [`dispatch`](Dispatcher::dispatch) call
/// and discarded at its end; nothing leaks across requests. Dropping the
/// returned future abandons the transfer best-effort; no cancellation
/// token is plumbed through the read loop.
pub struct Dispatcher {
    client: reqwest::Client,
    config: Config,
}

impl Dispatcher {
    pub fn new(config: Config) -> Self {
        Dispatcher {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send `prompt` to the given models and reconcile the response stream.
    ///
    /// `models[i]` is the identifier dispatched for slot `i`; auto slots
    /// must already carry the sentinel. An empty identifier is a
    /// programming error in the caller and panics.
    ///
    /// `on_update` fires once per slot a processed event updates, after
    /// deduplication and resolution. Transport failure before any event
    /// marks every slot failed (with callbacks) so the caller never shows
    /// indefinite spinners; transport failure mid-stream leaves already
    /// delivered state untouched and surfaces the error once.
    pub async fn dispatch<F>(
        &self,
        prompt: &str,
        models: Vec<String>,
        mut on_update: F,
    ) -> Result<DispatchReport>
    where
        F: FnMut(SlotUpdate),
    {
        for (index, model) in models.iter().enumerate() {
            assert!(
                !model.is_empty(),
                "slot {index} has an empty model identifier; fill blank slots with the auto sentinel before dispatch"
            );
        }

        let mut slots: Vec<Slot> = models
            .iter()
            .enumerate()
            .map(|(index, model)| Slot::new(index, model.clone()))
            .collect();
        let mut table = SlotTable::new(&models);
        let mut filter = DuplicateFilter::new();
        let mut phase = DispatchPhase::Idle;
        let started = Instant::now();

        info!(
            "dispatching prompt to {} slots ({} auto)",
            slots.len(),
            table.pending_auto_slots()
        );

        let url = format!("{}/compare", self.config.api_base.trim_end_matches('/'));
        let mut request = self.client.post(&url).json(&CompareRequest {
            prompt,
            models: &models,
        });
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        transition(&mut phase, DispatchPhase::AwaitingHeaders);
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                transition(&mut phase, DispatchPhase::Failed);
                fail_all_slots(&mut slots, started, &mut on_update);
                return Err(err.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            transition(&mut phase, DispatchPhase::Failed);
            warn!("comparison request rejected with HTTP {status}");
            fail_all_slots(&mut slots, started, &mut on_update);
            return Err(DispatchError::Transport(format!("HTTP {status}")));
        }

        transition(&mut phase, DispatchPhase::Streaming);
        let mut records = Box::pin(record_stream(response.bytes_stream()));
        let mut events_processed = 0usize;

        while let Some(item) = records.next().await {
            let record = match item {
                Ok(record) => record,
                Err(err) => {
                    transition(&mut phase, DispatchPhase::Failed);
                    if events_processed == 0 {
                        fail_all_slots(&mut slots, started, &mut on_update);
                    } else {
                        warn!("stream failed after {events_processed} events; pending slots stay pending");
                    }
                    return Err(err);
                }
            };

            let class = table.classify(&record);
            if !filter.admit(class, &record.raw) {
                continue;
            }
            let Some(event) = record.event else {
                // Malformed payload, already logged by the parser.
                continue;
            };

            let indices = table.resolve(class, &event.model);
            if indices.is_empty() {
                continue;
            }

            let (text, is_error) = match (event.response.as_deref(), event.error.as_deref()) {
                (Some(response), None) => (response, false),
                (None, Some(error)) => (error, true),
                _ => continue,
            };
            // The protocol reports no per-model timing, only end-to-end.
            let elapsed_ms = started.elapsed().as_millis() as u64;
            let token_count = (!is_error).then(|| estimate_tokens(text));
            events_processed += 1;

            for index in indices {
                let slot = &mut slots[index];
                slot.state = if is_error {
                    SlotState::Failed
                } else {
                    SlotState::Fulfilled
                };
                slot.response = text.to_string();
                slot.resolved_model = Some(event.model.clone());
                slot.response_time_ms = Some(elapsed_ms);
                slot.token_count = token_count;
                on_update(SlotUpdate {
                    slot_index: index,
                    requested_model: slot.requested_model.clone(),
                    resolved_model: slot.resolved_model.clone(),
                    text: text.to_string(),
                    is_error,
                    token_count,
                    response_time_ms: elapsed_ms,
                });
            }
        }

        transition(&mut phase, DispatchPhase::Completed);
        info!(
            "dispatch completed: {events_processed} events in {}ms",
            started.elapsed().as_millis()
        );
        Ok(DispatchReport {
            evaluation: EvaluationSummary::from_slots(&slots),
            slots,
            events_processed,
        })
    }
}

/// Mark every slot failed with a generic connectivity message, invoking the
/// callback for each so the display layer sees the terminal state.
fn fail_all_slots<F>(slots: &mut [Slot], started: Instant, on_update: &mut F)
where
    F: FnMut(SlotUpdate),
{
    let elapsed_ms = started.elapsed().as_millis() as u64;
    for slot in slots.iter_mut() {
        slot.state = SlotState::Failed;
        slot.response = CONNECTIVITY_ERROR.to_string();
        slot.response_time_ms = Some(elapsed_ms);
        // No server event named a model for this slot.
        on_update(SlotUpdate {
            slot_index: slot.index,
            requested_model: slot.requested_model.clone(),
            resolved_model: slot.resolved_model.clone(),
            text: CONNECTIVITY_ERROR.to_string(),
            is_error: true,
            token_count: None,
            response_time_ms: elapsed_ms,
        });
    }
}
