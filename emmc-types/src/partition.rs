// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::{DeviceStatus, ShortText};

/// Partition metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartitionInfo {
    pub partition_id: ShortText,

    pub name: ShortText,

    /// Where the partition is mounted; empty when unmounted
    pub mount_path: ShortText,

    /// Filesystem format (e.g., "ext4", "vfat")
    pub format: ShortText,

    #[serde(default)]
    pub status: DeviceStatus,

    /// Size in bytes
    pub capacity: u64,

    /// Free space in bytes
    pub free_space: u64,

    /// Supports time-shift buffering
    #[serde(default)]
    pub is_tsb_supported: bool,

    #[serde(default)]
    pub is_dvr_supported: bool,
}

impl PartitionInfo {
    pub fn is_mounted(&self) -> bool {
        !self.mount_path.is_empty()
    }

    pub fn used_space(&self) -> u64 {
        self.capacity.saturating_sub(self.free_space)
    }

    /// Used space as a percentage (0-100); 0 for an empty partition.
    pub fn usage_percent(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        ((self.used_space() as u128 * 100) / self.capacity as u128) as u32
    }
}
