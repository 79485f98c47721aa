//! Error types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while building the catalog snapshot.
///
/// Individual malformed records are not errors; they are skipped and
/// counted in [`super::LoadReport`]. A `LoadError` means a whole source
/// file is unusable, which aborts startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read data source '{path}': {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("data source '{path}' is malformed: {source}")]
    SourceMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
