// SPDX-License-Identifier: MIT
//! Storage error kinds shared by the session log and the state store.
//!
//! Read failures are "soft": aggregate read paths degrade to zero values and
//! never surface them to the HTTP layer. Write failures are hard: a failed
//! append or state save propagates up and becomes a 500.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An append or save could not be completed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line in the session log did not parse. The whole read is treated
    /// as failed — consumers see no data rather than partial data.
    #[error("malformed record in {path} at line {line}: {source}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
