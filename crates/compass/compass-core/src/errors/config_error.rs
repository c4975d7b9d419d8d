/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {reason}")]
    Parse { reason: String },

    #[error("config value out of range: {key} = {value}")]
    OutOfRange { key: String, value: f64 },
}
