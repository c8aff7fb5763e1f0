// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Contract violations detected while building or decoding model values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("string of {len} bytes does not fit in a field of capacity {capacity}")]
    StringTooLong { len: usize, capacity: usize },

    #[error("string contains an interior NUL at byte {position}")]
    InteriorNul { position: usize },

    #[error("field of capacity {capacity} is not NUL-terminated")]
    MissingNul { capacity: usize },

    #[error("{what} holds at most {capacity} entries, got {len}")]
    CapacityExceeded {
        what: &'static str,
        len: usize,
        capacity: usize,
    },

    #[error("diagnostics blob of {len} bytes exceeds {capacity} bytes")]
    BlobTooLarge { len: usize, capacity: usize },

    #[error("unknown device type: {0}")]
    UnknownDeviceType(i32),

    #[error("unknown device status bits: {0:#x}")]
    UnknownStatusBits(u32),

    #[error("unknown event kind: {0}")]
    UnknownEventKind(i32),

    #[error("unknown return code: {0}")]
    UnknownReturnCode(i32),
}
