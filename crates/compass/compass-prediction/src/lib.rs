//! # compass-prediction
//!
//! Loading strategy predictor, constraint optimizer, smart cache, and
//! preload selection.
//!
//! ```text
//! estimate_time = items × per_item_ms × (1 − bonus × utilization)
//!                 / (1 + ln parallelism) × (1 + penalty × compression)
//! ```

pub mod cache;
pub mod optimizer;
pub mod planner;
pub mod predictor;
pub mod preload;

pub use cache::{MaintenanceReport, SmartCache};
pub use optimizer::LoadingOptimizer;
pub use planner::LoadingPlanner;
pub use predictor::LoadingPredictor;
pub use preload::{select_preload, PreloadInputs};
