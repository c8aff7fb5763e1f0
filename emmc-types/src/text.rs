// SPDX-License-Identifier: GPL-3.0-only

//! Capacity-bounded text fields

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::limits::{DIAGNOSTICS_LENGTH, MAX_STRING_LENGTH, MOUNT_PATH_LENGTH, PARTITION_LENGTH};

/// UTF-8 text that fits a C `char[N]` field including its NUL terminator.
///
/// Holds at most `N - 1` bytes and never an interior NUL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedString<const N: usize>(String);

/// Identity strings: device IDs, names, versions, attribute names/values.
pub type ShortText = BoundedString<MAX_STRING_LENGTH>;

/// Free-text partitions field of a device.
pub type PartitionsText = BoundedString<PARTITION_LENGTH>;

/// Diagnostics string carried by an event.
pub type DiagnosticsText = BoundedString<DIAGNOSTICS_LENGTH>;

/// Mount path carried by mount callback data.
pub type MountPath = BoundedString<MOUNT_PATH_LENGTH>;

impl<const N: usize> BoundedString<N> {
    /// Total field size on the wire, terminator included.
    pub const CAPACITY: usize = N;

    /// Validate `value` against the field capacity.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if let Some(position) = value.bytes().position(|b| b == 0) {
            return Err(ModelError::InteriorNul { position });
        }
        if value.len() >= N {
            return Err(ModelError::StringTooLong {
                len: value.len(),
                capacity: N,
            });
        }
        Ok(Self(value))
    }

    /// Build from `value`, cutting at the first NUL and at the last char
    /// boundary that fits.
    pub fn truncated(value: &str) -> Self {
        let value = value.split('\0').next().unwrap_or_default();
        let mut end = value.len().min(N.saturating_sub(1));
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        Self(value[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> AsRef<str> for BoundedString<N> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> TryFrom<String> for BoundedString<N> {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<&str> for BoundedString<N> {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> From<BoundedString<N>> for String {
    fn from(value: BoundedString<N>) -> Self {
        value.0
    }
}
