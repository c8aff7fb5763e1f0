// SPDX-License-Identifier: GPL-3.0-only

//! Enumerations shared with the platform header
//!
//! Integer values are part of the wire contract and must not change.

use std::fmt;

use enumflags2::{BitFlags, bitflags};
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Result of a HAL query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum ReturnCode {
    Success = 0,
    GenericFailure = -1,
    InitFailure = -2,
    InvalidInput = -3,
    UnknownFailure = -4,
}

impl ReturnCode {
    pub const ALL: [ReturnCode; 5] = [
        Self::Success,
        Self::GenericFailure,
        Self::InitFailure,
        Self::InvalidInput,
        Self::UnknownFailure,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl TryFrom<i32> for ReturnCode {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|rc| rc.code() == code)
            .ok_or(ModelError::UnknownReturnCode(code))
    }
}

/// Kind of storage device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DeviceType {
    Hdd = 0,
    SdCard = 1,
    Usb = 2,
    Flash = 3,
    Nvram = 4,
    #[default]
    EmmcCard = 5,
    /// Upper bound of the enumeration. Valid on the wire, never a real device.
    Max = 6,
}

impl DeviceType {
    pub const ALL: [DeviceType; 7] = [
        Self::Hdd,
        Self::SdCard,
        Self::Usb,
        Self::Flash,
        Self::Nvram,
        Self::EmmcCard,
        Self::Max,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_sentinel(self) -> bool {
        self == Self::Max
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hdd => "HDD",
            Self::SdCard => "SD card",
            Self::Usb => "USB",
            Self::Flash => "Flash",
            Self::Nvram => "NVRAM",
            Self::EmmcCard => "eMMC card",
            Self::Max => "max",
        }
    }
}

impl TryFrom<i32> for DeviceType {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(ModelError::UnknownDeviceType(code))
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One condition a device or partition can be in
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatusFlag {
    ReadOnly = 1 << 0,
    NotPresent = 1 << 1,
    NotQualified = 1 << 2,
    DiskFull = 1 << 3,
    ReadFailure = 1 << 4,
    WriteFailure = 1 << 5,
    Unknown = 1 << 6,
}

/// Set of conditions; the empty set means OK.
pub type DeviceStatus = BitFlags<DeviceStatusFlag>;

impl DeviceStatusFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "read_only",
            Self::NotPresent => "not_present",
            Self::NotQualified => "not_qualified",
            Self::DiskFull => "disk_full",
            Self::ReadFailure => "read_failure",
            Self::WriteFailure => "write_failure",
            Self::Unknown => "unknown",
        }
    }

    /// Decode a wire bitmask, rejecting bits outside the known flags.
    pub fn decode(bits: u32) -> Result<DeviceStatus, ModelError> {
        DeviceStatus::from_bits(bits).map_err(|e| ModelError::UnknownStatusBits(e.invalid_bits()))
    }

    /// `"ok"` for the empty set, otherwise the flag names joined by `|`.
    pub fn describe(status: DeviceStatus) -> String {
        if status.is_empty() {
            return "ok".to_string();
        }
        status
            .iter()
            .map(DeviceStatusFlag::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Kind of notification carried by an event message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum EventKind {
    StatusChanged = 100,
    HealthWarning = 101,
    DeviceFailure = 102,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        Self::StatusChanged,
        Self::HealthWarning,
        Self::DeviceFailure,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for EventKind {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or(ModelError::UnknownEventKind(code))
    }
}
