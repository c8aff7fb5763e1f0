// SPDX-License-Identifier: GPL-3.0-only

use emmc_types::{ModelError, ReturnCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy of the HAL, one variant per failure return code.
///
/// Transient and permanent failures are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalErrorKind {
    Generic,
    Init,
    InvalidInput,
    Unknown,
}

impl HalErrorKind {
    pub fn return_code(self) -> ReturnCode {
        match self {
            Self::Generic => ReturnCode::GenericFailure,
            Self::Init => ReturnCode::InitFailure,
            Self::InvalidInput => ReturnCode::InvalidInput,
            Self::Unknown => ReturnCode::UnknownFailure,
        }
    }

    /// Kind for a failure return code; `None` for `Success`.
    pub fn from_return_code(code: ReturnCode) -> Option<Self> {
        match code {
            ReturnCode::Success => None,
            ReturnCode::GenericFailure => Some(Self::Generic),
            ReturnCode::InitFailure => Some(Self::Init),
            ReturnCode::InvalidInput => Some(Self::InvalidInput),
            ReturnCode::UnknownFailure => Some(Self::Unknown),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct HalError {
    pub kind: HalErrorKind,
    pub message: String,
}

impl HalError {
    pub fn new(kind: HalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(HalErrorKind::Generic, message)
    }

    pub fn init(message: impl Into<String>) -> Self {
        Self::new(HalErrorKind::Init, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(HalErrorKind::InvalidInput, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(HalErrorKind::Unknown, message)
    }

    pub fn return_code(&self) -> ReturnCode {
        self.kind.return_code()
    }
}

/// A backend produced a value that violates the data contract.
impl From<ModelError> for HalError {
    fn from(error: ModelError) -> Self {
        Self::generic(error.to_string())
    }
}
