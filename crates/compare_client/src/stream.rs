//! Byte chunks -> framed record adapter.
//!
//! The upstream body is a sequence of `data: `-prefixed records separated
//! by blank lines. [`eventsource-stream`] handles the framing, including
//! records split across chunk boundaries (buffered and reassembled) and an
//! unterminated trailing record at close (dropped, it was never complete).
//! Payload decoding happens here so the rest of the engine only sees
//! [`StreamRecord`] values.

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;

use crate::error::DispatchError;

/// One decoded event payload: the answering model plus exactly one of
/// `response`/`error`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelEvent {
    pub model: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelEvent {
    fn is_valid(&self) -> bool {
        self.response.is_some() != self.error.is_some()
    }
}

/// One framed record. `event` is `None` when the payload failed to decode
/// or violated the one-of-response/error rule; such records are kept (with
/// their raw text) so the duplicate filter can still suppress repeats.
#[derive(Debug, Clone)]
pub struct StreamRecord {
    pub raw: String,
    pub event: Option<ModelEvent>,
}

fn decode_record(raw: String) -> StreamRecord {
    let event = serde_json::from_str::<ModelEvent>(&raw)
        .ok()
        .filter(ModelEvent::is_valid);
    if event.is_none() {
        log::warn!("dropping malformed stream record: {raw}");
    }
    StreamRecord { raw, event }
}

/// Frame a byte-chunk stream into records.
///
/// Transport-level read failures surface as [`DispatchError::Stream`];
/// framing noise (comments, unknown fields) is absorbed by the SSE parser.
pub fn record_stream<S, B, E>(
    bytes: S,
) -> impl Stream<Item = Result<StreamRecord, DispatchError>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    bytes.eventsource().map(|item| match item {
        Ok(event) => Ok(decode_record(event.data)),
        Err(err) => Err(DispatchError::Stream(err.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    const BODY: &str = concat!(
        "data: {\"model\":\"gpt-4\",\"response\":\"A\"}\n\n",
        "data: {\"model\":\"claude-3\",\"response\":\"B\"}\n\n",
        "data: {not json\n\n",
        "data: {\"model\":\"llama-2\",\"error\":\"rate limited\"}\n\n",
    );

    async fn collect(chunks: Vec<&'static [u8]>) -> Vec<StreamRecord> {
        let source = futures_util::stream::iter(
            chunks.into_iter().map(Ok::<_, Infallible>),
        );
        record_stream(source)
            .map(|record| record.expect("no transport errors in test"))
            .collect()
            .await
    }

    #[tokio::test]
    async fn single_chunk_delivery() {
        let records = collect(vec![BODY.as_bytes()]).await;
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].event.as_ref().unwrap().model, "gpt-4");
        assert!(records[2].event.is_none(), "malformed payload decodes to None");
        assert_eq!(
            records[3].event.as_ref().unwrap().error.as_deref(),
            Some("rate limited")
        );
    }

    #[tokio::test]
    async fn boundary_invariance_across_arbitrary_splits() {
        let whole = collect(vec![BODY.as_bytes()]).await;
        let body = BODY.as_bytes();
        // Split at a handful of awkward positions, including mid-prefix and
        // mid-separator.
        for split in [1, 5, 7, 38, 39, 40, 41, body.len() - 2] {
            let (head, tail) = body.split_at(split);
            let records = collect(vec![head, tail]).await;
            assert_eq!(records.len(), whole.len(), "split at {split}");
            for (a, b) in whole.iter().zip(&records) {
                assert_eq!(a.raw, b.raw, "split at {split}");
                assert_eq!(a.event, b.event, "split at {split}");
            }
        }
    }

    #[tokio::test]
    async fn unterminated_trailing_record_is_dropped() {
        let records = collect(vec![
            b"data: {\"model\":\"gpt-4\",\"response\":\"A\"}\n\n",
            b"data: {\"model\":\"claude-3\",\"resp",
        ])
        .await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event.as_ref().unwrap().model, "gpt-4");
    }

    #[tokio::test]
    async fn records_without_data_prefix_are_discarded() {
        let records = collect(vec![
            b"noise without a field\n\ndata: {\"model\":\"gemini\",\"response\":\"ok\"}\n\n",
        ])
        .await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event.as_ref().unwrap().model, "gemini");
    }

    #[tokio::test]
    async fn both_response_and_error_is_malformed() {
        let records = collect(vec![
            b"data: {\"model\":\"gpt-4\",\"response\":\"A\",\"error\":\"boom\"}\n\n",
        ])
        .await;
        assert_eq!(records.len(), 1);
        assert!(records[0].event.is_none());
    }
}
