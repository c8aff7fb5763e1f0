// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use emmc_contracts::HalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse snapshot {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("invalid snapshot: {reason}")]
    Invalid { reason: String },
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

/// A backend that cannot load its snapshot never initialized.
impl From<SnapshotError> for HalError {
    fn from(error: SnapshotError) -> Self {
        HalError::init(error.to_string())
    }
}
