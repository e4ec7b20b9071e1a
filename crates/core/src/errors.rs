/// Errors that abort a pipeline run.
///
/// Only structural problems are fatal: a source that cannot supply the
/// documented schema, or an unreadable file. Malformed individual values
/// never surface here — the normalizer degrades them to null and logs a
/// data-quality warning instead.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("required column missing: {0}")]
    MissingColumn(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("data not found: {0}")]
    NotFound(String),
}
