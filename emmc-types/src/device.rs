// SPDX-License-Identifier: GPL-3.0-only

//! Device identity and inventory models

use serde::{Deserialize, Serialize};

use crate::limits::MAX_DEVICES;
use crate::{
    BoundedVec, DeviceStatus, DeviceStatusFlag, DeviceType, PartitionsText, ShortText,
    bytes_to_pretty,
};

/// Identity, capacity and status of one storage device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceInfo {
    // === Identity ===
    /// Unique identifier or serial number (vendor specific)
    pub device_id: ShortText,

    pub device_type: DeviceType,

    // === Physical Properties ===
    /// Total size in bytes
    pub capacity: u64,

    /// Current conditions; empty means OK
    #[serde(default)]
    pub status: DeviceStatus,

    /// Free-text description of the partitions (vendor specific)
    #[serde(default)]
    pub partitions: PartitionsText,

    // === Vendor Strings ===
    #[serde(default)]
    pub manufacturer: ShortText,

    #[serde(default)]
    pub model: ShortText,

    #[serde(default)]
    pub serial_number: ShortText,

    #[serde(default)]
    pub firmware_version: ShortText,

    #[serde(default)]
    pub hw_version: ShortText,

    /// ATA standard the interface conforms to, if any
    #[serde(default)]
    pub ata_standard: ShortText,

    #[serde(default)]
    pub has_smart_support: bool,
}

/// Up to [`MAX_DEVICES`] devices
pub type DeviceInfoList = BoundedVec<DeviceInfo, MAX_DEVICES>;

/// Up to [`MAX_DEVICES`] device IDs
pub type DeviceIdList = BoundedVec<ShortText, MAX_DEVICES>;

impl DeviceInfo {
    /// Record for a platform where no storage device could be found.
    pub fn absent() -> Self {
        Self {
            status: DeviceStatusFlag::NotPresent.into(),
            ..Self::default()
        }
    }

    pub fn is_present(&self) -> bool {
        !self.status.contains(DeviceStatusFlag::NotPresent)
    }

    /// True when no condition flag is set.
    pub fn is_ok(&self) -> bool {
        self.status.is_empty()
    }

    pub fn is_writable(&self) -> bool {
        !self.status.intersects(
            DeviceStatusFlag::ReadOnly | DeviceStatusFlag::DiskFull | DeviceStatusFlag::WriteFailure,
        )
    }

    /// Get a human-readable display name for the device
    pub fn display_name(&self) -> String {
        if !self.model.is_empty() && !self.manufacturer.is_empty() {
            format!("{} {}", self.manufacturer, self.model)
        } else if !self.model.is_empty() {
            self.model.to_string()
        } else if !self.device_id.is_empty() {
            self.device_id.to_string()
        } else {
            format!("Unknown {}", self.device_type)
        }
    }

    pub fn capacity_pretty(&self) -> String {
        bytes_to_pretty(self.capacity, true)
    }
}
