//! compare_core - Core types and utilities for the model comparison engine
//!
//! This crate provides the foundational pieces shared by the engine and the CLI:
//! - `slot` - Slot, SlotState, SlotUpdate
//! - `catalog` - selectable model catalog and the auto sentinel
//! - `tokens` - approximate token counting
//! - `eval` - post-run evaluation summary
//! - `config` - client configuration

pub mod catalog;
pub mod config;
pub mod eval;
pub mod slot;
pub mod tokens;

// Re-export commonly used types
pub use catalog::{available_models, label_for, ModelOption, AUTO_MODEL};
pub use config::Config;
pub use eval::{EvaluationRow, EvaluationSummary};
pub use slot::{Slot, SlotState, SlotUpdate};
pub use tokens::estimate_tokens;
