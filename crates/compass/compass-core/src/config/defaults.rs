// Single source of truth for all default values.
// None of these are empirically validated; they are tunable starting points.

// --- Graph / scoring ---
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_LANGUAGE_INCREMENT: f64 = 0.3;
pub const DEFAULT_FRAMEWORK_INCREMENT: f64 = 0.25;
pub const DEFAULT_PROJECT_TYPE_INCREMENT: f64 = 0.2;
pub const DEFAULT_EXISTING_STANDARD_INCREMENT: f64 = 0.2;
pub const DEFAULT_SECURITY_INCREMENT: f64 = 0.4;
pub const DEFAULT_PERFORMANCE_INCREMENT: f64 = 0.3;
pub const DEFAULT_FEEDBACK_DELTA: f64 = 0.05;
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;
pub const DEFAULT_RANK_CONFIDENCE_WEIGHT: f64 = 0.4;
pub const DEFAULT_RANK_PRIORITY_WEIGHT: f64 = 0.3;
pub const DEFAULT_RANK_EFFORT_WEIGHT: f64 = 0.2;
pub const DEFAULT_RANK_ROI_WEIGHT: f64 = 0.1;
pub const DEFAULT_PATTERN_USAGE_SHARE: f64 = 0.5;

// --- Mining ---
pub const DEFAULT_MINING_WINDOW: usize = 1_000;
pub const DEFAULT_SEQUENTIAL_MIN_FREQUENCY: u64 = 3;
pub const DEFAULT_CONTEXTUAL_MIN_GROUP: usize = 5;
pub const DEFAULT_TEMPORAL_MIN_BUCKET: usize = 5;
pub const DEFAULT_TEMPORAL_CONFIDENCE: f64 = 0.75;

// --- Analysis ---
pub const DEFAULT_PERFORMANCE_RECENT_WINDOW: usize = 10;
pub const DEFAULT_RESPONSE_DEGRADATION_RATIO: f64 = 0.3;
pub const DEFAULT_ERROR_RATE_THRESHOLD: f64 = 0.05;
pub const DEFAULT_MEMORY_USAGE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_BEHAVIOR_MIN_GROUP: usize = 5;
pub const DEFAULT_LOW_SATISFACTION_THRESHOLD: f64 = 0.6;
pub const DEFAULT_LOW_COMPLETION_THRESHOLD: f64 = 0.7;
pub const DEFAULT_FEEDBACK_WINDOW: usize = 100;
pub const DEFAULT_FEEDBACK_MIN_SAMPLES: usize = 5;
pub const DEFAULT_NEGATIVE_RATIO_THRESHOLD: f64 = 0.3;

// --- Loading ---
pub const DEFAULT_CHUNK_SIZE: usize = 2_000;
pub const DEFAULT_PARALLELISM: usize = 4;
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;
pub const DEFAULT_CACHE_DURATION_SECS: u64 = 3_600;
pub const DEFAULT_MAX_PRIORITY_ITEMS: usize = 50;
pub const DEFAULT_MAX_TOKENS: usize = 100_000;
pub const DEFAULT_MAX_LOAD_TIME_MS: u64 = 5_000;
pub const DEFAULT_MEMORY_LIMIT_MB: f64 = 512.0;
pub const DEFAULT_CONCURRENT_LIMIT: usize = 8;
pub const DEFAULT_TOKEN_CHUNK_SHRINK: f64 = 0.7;
pub const DEFAULT_TOKEN_ITEM_TRIM: f64 = 0.8;
pub const DEFAULT_PER_ITEM_MS: f64 = 100.0;
pub const DEFAULT_CACHE_TIME_BONUS: f64 = 0.5;
pub const DEFAULT_COMPRESSION_TIME_PENALTY: f64 = 0.02;
pub const DEFAULT_LOW_BANDWIDTH_PRELOAD_CAP: usize = 3;

// --- Cache / preload ---
pub const DEFAULT_PRELOAD_PROBABILITY: f64 = 0.7;
pub const DEFAULT_PRELOAD_MEMORY_SHARE: f64 = 0.1;
pub const DEFAULT_PRELOAD_TIME_SHARE: f64 = 0.2;
pub const DEFAULT_MAX_PRELOAD_CANDIDATES: usize = 5;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 500;
pub const DEFAULT_CACHE_MAX_BYTES: u64 = 64 * 1024 * 1024; // 64 MB
pub const DEFAULT_SESSION_WINDOW_SECS: i64 = 1_800; // 30 minutes
pub const DEFAULT_PRELOAD_PRIORITY: u8 = 5;
pub const DEFAULT_MEMO_CAPACITY: u64 = 1_024;

// --- Adaptation ---
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 900; // 15 minutes
pub const DEFAULT_FEEDBACK_TRIGGER: usize = 50;
pub const DEFAULT_FOLLOW_PRIOR_LIMIT: usize = 10;
pub const DEFAULT_PATTERN_PRIOR_BOOST: f64 = 0.2;

// --- Storage ---
pub const DEFAULT_STATE_DIR: &str = ".compass";
pub const DEFAULT_MAX_INTERACTIONS: usize = 10_000;
pub const DEFAULT_MAX_FEEDBACK: usize = 5_000;
pub const DEFAULT_MAX_METRICS: usize = 5_000;
pub const DEFAULT_MAX_PENDING_CACHE_OPS: usize = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
