use std::path::PathBuf;

/// Errors produced by the randomization pipeline.
///
/// `Conversion` is the only recoverable variant: the offending source is
/// dropped from the pool and the run continues. Everything else aborts the
/// run with a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid run parameters, rejected before any work starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The encoder binary could not be resolved.
    #[error("encoder not found: {0}")]
    EncoderNotFound(String),

    /// A single source failed to normalize; the caller skips it.
    #[error("conversion failed for {path}: {reason}", path = .path.display())]
    Conversion { path: PathBuf, reason: String },

    /// No usable source remained when scheduling started.
    #[error("scheduling failed: {0}")]
    Scheduling(String),

    /// The final concatenation failed. There is no fallback.
    #[error("composition failed: {0}")]
    Compose(String),

    /// The run was interrupted by a shutdown signal.
    #[error("interrupted")]
    Interrupted,

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
