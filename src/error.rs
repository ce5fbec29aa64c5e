use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline errors. Field-level coercion failures are never errors;
/// they become NULLs in the normalized output (see `normalize`).
#[derive(Debug, Error)]
pub enum EtlError {
    /// Source workbook missing or unreadable.
    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        source: calamine::XlsxError,
    },

    /// A named sheet is absent or unreadable.
    #[error("failed to read sheet {sheet:?}: {source}")]
    Sheet {
        sheet: String,
        source: calamine::XlsxError,
    },

    /// Destination unreachable or credentials rejected.
    #[error("failed to connect to destination database: {0}")]
    Connect(#[source] postgres::Error),

    /// Destination table missing or truncate denied.
    #[error("failed to truncate table {table}: {source}")]
    Truncate {
        table: String,
        source: postgres::Error,
    },

    /// A chunk's bulk insert failed. Chunks committed before this one stay
    /// in the destination table; the run halts here.
    #[error("bulk insert failed for rows {start} to {end}: {source}")]
    Insert {
        start: usize,
        end: usize,
        source: postgres::Error,
    },
}
