// SPDX-License-Identifier: GPL-3.0-only

//! Fixed capacities shared with the C layouts.
//!
//! String capacities include the NUL terminator, so a string stored in a
//! field of capacity `N` holds at most `N - 1` bytes of text.

/// Max number of devices in a device list.
pub const MAX_DEVICES: usize = 10;

/// Capacity of identity strings (IDs, names, versions).
pub const MAX_STRING_LENGTH: usize = 128;

/// Capacity of the free-text partitions field of a device.
pub const PARTITION_LENGTH: usize = 256;

/// Capacity of the diagnostics string carried by events.
pub const DIAGNOSTICS_LENGTH: usize = 256;

/// Size of the opaque diagnostics blob.
pub const DIAGNOSTICS_BLOB_LENGTH: usize = 2048;

/// Max number of SMART diagnostics attributes in one list.
pub const MAX_DIAGNOSTIC_ATTRIBUTES: usize = 20;

/// Capacity of the mount path in mount callback data.
pub const MOUNT_PATH_LENGTH: usize = 200;
