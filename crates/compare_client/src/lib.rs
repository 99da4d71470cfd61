//! compare_client - Streaming response reconciliation engine
//!
//! One multiplexed request carries N logical model slots; the response is a
//! single event stream whose records arrive in arbitrary order, possibly
//! duplicated, and identify only the answering model. This crate routes
//! each record back to the slot(s) that asked for it, including slots that
//! delegated model choice to the server.
//!
//! Pipeline: [`dispatch::Dispatcher`] -> [`stream::record_stream`] ->
//! [`dedup::DuplicateFilter`] -> [`router::SlotTable`] -> display callback.

pub mod dedup;
pub mod dispatch;
pub mod error;
pub mod router;
pub mod stream;

pub use dedup::DuplicateFilter;
pub use dispatch::{DispatchPhase, DispatchReport, Dispatcher};
pub use error::{DispatchError, Result};
pub use router::{EventClass, SlotTable};
pub use stream::{record_stream, ModelEvent, StreamRecord};
