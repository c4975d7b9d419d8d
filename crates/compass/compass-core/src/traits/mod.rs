//! Seams between subsystems.

mod analyzer;
mod storage;

pub use analyzer::{AnalysisInput, ISignalAnalyzer};
pub use storage::IStateStore;
