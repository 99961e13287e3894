use std::path::PathBuf;

use thiserror::Error;

/// Startup failures while reading the clustering workbook.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("workbook not found: {}", path.display())]
    MissingFile { path: PathBuf },
    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet `{sheet}` is missing from the workbook")]
    MissingTable { sheet: String },
    #[error("failed to read sheet `{sheet}`: {source}")]
    ReadTable {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet `{sheet}` has no header row")]
    EmptyTable { sheet: String },
    #[error("sheet `{sheet}` has no `{column}` column")]
    MissingColumn { sheet: String, column: String },
}
