use thiserror::Error;

/// Failures the engine can actually surface. Sparse or malformed market data
/// never ends up here; it degrades to zeroed results instead. Only broken
/// call contracts do.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("snapshot comparison requires at least 2 snapshots, got {got}")]
    NotEnoughSnapshots { got: usize },
}
