//! Error types for cura-sync

/// Result type for cura-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or synchronizing files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A group's live objects are spread over more than one file
    #[error("Group {group} spans {} files: {}", files.len(), files.join(", "))]
    MultiFileGroup { group: String, files: Vec<String> },

    /// Filesystem error from cura-fs
    #[error(transparent)]
    Fs(#[from] cura_fs::Error),

    /// Directive error from cura-directive
    #[error(transparent)]
    Directive(#[from] cura_directive::Error),

    /// Block writing error from cura-blocks
    #[error(transparent)]
    Blocks(#[from] cura_blocks::Error),
}
