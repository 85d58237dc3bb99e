use camino::Utf8PathBuf;
use thiserror::Error;

/// Crate-wide error type for the longitude-crossing evaluation.
///
/// I/O and CSV-layer failures convert via `#[from]`; the remaining variants
/// describe domain preconditions (region bounds, worker counts, ensemble size)
/// and protocol faults in the distributed reduction.
#[derive(Error, Debug)]
pub enum LoncrossError {
    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV layer error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid track record on line {line}: {reason}")]
    InvalidTrackRecord { line: u64, reason: String },

    #[error("Invalid region definition: {0}")]
    InvalidRegion(String),

    #[error("Worker pool size must be at least 1")]
    InvalidWorkerCount,

    #[error("No ensemble members found under {0}")]
    NoEnsembleMembers(Utf8PathBuf),

    #[error("Ensemble statistics require at least one member histogram")]
    EmptyEnsemble,

    #[error("Histogram matrices in the ensemble stack have mismatched shapes")]
    ShapeMismatch,

    #[error("An executor terminated before returning its result")]
    ExecutorDisconnected,
}

impl PartialEq for LoncrossError {
    fn eq(&self, other: &Self) -> bool {
        use LoncrossError::*;
        match (self, other) {
            // Wrapped foreign errors compare by variant only
            (Io(_), Io(_)) => true,
            (Csv(_), Csv(_)) => true,
            (Json(_), Json(_)) => true,

            (
                InvalidTrackRecord { line: a, reason: b },
                InvalidTrackRecord { line: c, reason: d },
            ) => a == c && b == d,
            (InvalidRegion(a), InvalidRegion(b)) => a == b,
            (NoEnsembleMembers(a), NoEnsembleMembers(b)) => a == b,

            (InvalidWorkerCount, InvalidWorkerCount) => true,
            (EmptyEnsemble, EmptyEnsemble) => true,
            (ShapeMismatch, ShapeMismatch) => true,
            (ExecutorDisconnected, ExecutorDisconnected) => true,

            _ => false,
        }
    }
}
