//! # compass-storage
//!
//! Persistence for the three logical stores (graph, history, cache) as JSON
//! documents, plus the bounded in-memory event history.
//!
//! [`JsonFileStore`] writes each document atomically (temp file + rename).
//! [`MemoryStore`] keeps documents in memory for tests and ephemeral engines.

pub mod history;
pub mod json_store;
pub mod memory_store;
mod recovery;

pub use history::{HistoryLimits, HistoryLog};
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
