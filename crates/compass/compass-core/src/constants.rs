/// Compass system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version written into every persisted document.
pub const DOCUMENT_VERSION: u32 = 1;

/// Current version of the request context structs.
pub const CONTEXT_VERSION: u32 = 1;

/// Highest node priority.
pub const MAX_PRIORITY: u8 = 10;

/// Highest compression level a loading strategy can request.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Length of the interaction-type n-grams mined for sequential patterns.
pub const SEQUENCE_LENGTH: usize = 3;

/// Approximate bytes per token used for cache size estimates.
pub const BYTES_PER_TOKEN: u64 = 4;
