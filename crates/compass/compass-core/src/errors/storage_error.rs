/// Persistence errors for the JSON state documents.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("serialization failed for {document}: {reason}")]
    Serialization { document: String, reason: String },

    #[error("corrupt document {document}: {reason}")]
    Corrupt { document: String, reason: String },

    #[error("unsupported document version {found} for {document}, expected <= {supported}")]
    UnsupportedVersion {
        document: String,
        found: u32,
        supported: u32,
    },
}
