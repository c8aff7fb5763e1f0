// SPDX-License-Identifier: GPL-3.0-only

//! `#[repr(C)]` layouts of the platform header
//!
//! Field order, widths and array capacities mirror the C declarations
//! exactly. Enumerations cross as `c_int`, booleans as [`CBool`].

use std::fmt;

use emmc_types::limits::{
    DIAGNOSTICS_BLOB_LENGTH, DIAGNOSTICS_LENGTH, MAX_DEVICES, MAX_DIAGNOSTIC_ATTRIBUTES,
    MAX_STRING_LENGTH, MOUNT_PATH_LENGTH, PARTITION_LENGTH,
};
use libc::{c_char, c_int, c_ulonglong, c_ushort};

/// Storage of a C `_Bool`.
///
/// Held as a byte so that any value a C producer leaves behind is valid to
/// read; nonzero decodes as true.
pub type CBool = u8;

/// `eSTMGRDeviceIDs`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDeviceIds {
    pub num_of_devices: c_ushort,
    pub device_ids: [[c_char; MAX_STRING_LENGTH]; MAX_DEVICES],
}

/// `eSTMGRDeviceInfo`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDeviceInfo {
    pub device_id: [c_char; MAX_STRING_LENGTH],
    pub device_type: c_int,
    pub capacity: c_ulonglong,
    pub status: c_int,
    pub partitions: [c_char; PARTITION_LENGTH],
    pub manufacturer: [c_char; MAX_STRING_LENGTH],
    pub model: [c_char; MAX_STRING_LENGTH],
    pub serial_number: [c_char; MAX_STRING_LENGTH],
    pub firmware_version: [c_char; MAX_STRING_LENGTH],
    pub hw_version: [c_char; MAX_STRING_LENGTH],
    pub if_ata_standard: [c_char; MAX_STRING_LENGTH],
    pub has_smart_support: CBool,
}

/// `eSTMGRDeviceInfoList`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDeviceInfoList {
    pub num_of_devices: c_ushort,
    pub devices: [RawDeviceInfo; MAX_DEVICES],
}

/// `eSTMGRPartitionInfo`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawPartitionInfo {
    pub partition_id: [c_char; MAX_STRING_LENGTH],
    pub name: [c_char; MAX_STRING_LENGTH],
    pub mount_path: [c_char; MAX_STRING_LENGTH],
    pub format: [c_char; MAX_STRING_LENGTH],
    pub status: c_int,
    pub capacity: c_ulonglong,
    pub free_space: c_ulonglong,
    pub is_tsb_supported: CBool,
    pub is_dvr_supported: CBool,
}

/// `eSTMGRDiagAttributes`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDiagAttribute {
    pub name: [c_char; MAX_STRING_LENGTH],
    pub value: [c_char; MAX_STRING_LENGTH],
}

/// `eSTMGRDiagAttributesList`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDiagAttributesList {
    pub num_of_attributes: c_ushort,
    pub diagnostics: [RawDiagAttribute; MAX_DIAGNOSTIC_ATTRIBUTES],
}

/// Anonymous union inside `eSTMGRHealthInfo`.
///
/// Both views are plain bytes, so every bit pattern is valid for either.
#[repr(C)]
#[derive(Clone, Copy)]
pub union RawDiagnostics {
    pub list: RawDiagAttributesList,
    pub blob: [c_char; DIAGNOSTICS_BLOB_LENGTH],
}

/// `eSTMGRHealthInfo`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawHealthInfo {
    pub device_id: [c_char; MAX_STRING_LENGTH],
    pub device_type: c_int,
    pub is_operational: CBool,
    pub is_healthy: CBool,
    pub diagnostics: RawDiagnostics,
    pub lifetimes_list: RawDiagAttributesList,
    pub first_exceeded_configured_life: RawDiagAttributesList,
    pub first_exceeded_max_life: RawDiagAttributesList,
    pub health_states_list: RawDiagAttributesList,
}

/// `eSTMGREventMessage`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawEventMessage {
    pub event_type: c_int,
    pub device_id: [c_char; MAX_STRING_LENGTH],
    pub device_type: c_int,
    pub device_status: c_int,
    pub description: [c_char; MAX_STRING_LENGTH],
    pub diagnostics: [c_char; DIAGNOSTICS_LENGTH],
}

/// `eSTMGRCallBackData`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawCallBackData {
    pub is_sd_card: CBool,
    pub mount_path: [c_char; MOUNT_PATH_LENGTH],
}

impl Default for RawDeviceIds {
    fn default() -> Self {
        Self {
            num_of_devices: 0,
            device_ids: [[0; MAX_STRING_LENGTH]; MAX_DEVICES],
        }
    }
}

impl Default for RawDeviceInfo {
    fn default() -> Self {
        Self {
            device_id: [0; MAX_STRING_LENGTH],
            device_type: 0,
            capacity: 0,
            status: 0,
            partitions: [0; PARTITION_LENGTH],
            manufacturer: [0; MAX_STRING_LENGTH],
            model: [0; MAX_STRING_LENGTH],
            serial_number: [0; MAX_STRING_LENGTH],
            firmware_version: [0; MAX_STRING_LENGTH],
            hw_version: [0; MAX_STRING_LENGTH],
            if_ata_standard: [0; MAX_STRING_LENGTH],
            has_smart_support: 0,
        }
    }
}

impl Default for RawDeviceInfoList {
    fn default() -> Self {
        Self {
            num_of_devices: 0,
            devices: [RawDeviceInfo::default(); MAX_DEVICES],
        }
    }
}

impl Default for RawPartitionInfo {
    fn default() -> Self {
        Self {
            partition_id: [0; MAX_STRING_LENGTH],
            name: [0; MAX_STRING_LENGTH],
            mount_path: [0; MAX_STRING_LENGTH],
            format: [0; MAX_STRING_LENGTH],
            status: 0,
            capacity: 0,
            free_space: 0,
            is_tsb_supported: 0,
            is_dvr_supported: 0,
        }
    }
}

impl Default for RawDiagAttribute {
    fn default() -> Self {
        Self {
            name: [0; MAX_STRING_LENGTH],
            value: [0; MAX_STRING_LENGTH],
        }
    }
}

impl Default for RawDiagAttributesList {
    fn default() -> Self {
        Self {
            num_of_attributes: 0,
            diagnostics: [RawDiagAttribute::default(); MAX_DIAGNOSTIC_ATTRIBUTES],
        }
    }
}

impl Default for RawDiagnostics {
    /// All-zero storage; the list view is the larger one, so it covers
    /// every byte of the union.
    fn default() -> Self {
        Self {
            list: RawDiagAttributesList::default(),
        }
    }
}

impl Default for RawHealthInfo {
    fn default() -> Self {
        Self {
            device_id: [0; MAX_STRING_LENGTH],
            device_type: 0,
            is_operational: 0,
            is_healthy: 0,
            diagnostics: RawDiagnostics::default(),
            lifetimes_list: RawDiagAttributesList::default(),
            first_exceeded_configured_life: RawDiagAttributesList::default(),
            first_exceeded_max_life: RawDiagAttributesList::default(),
            health_states_list: RawDiagAttributesList::default(),
        }
    }
}

impl fmt::Debug for RawHealthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawHealthInfo")
            .field("device_type", &self.device_type)
            .field("is_operational", &self.is_operational)
            .field("is_healthy", &self.is_healthy)
            .finish_non_exhaustive()
    }
}

impl Default for RawEventMessage {
    fn default() -> Self {
        Self {
            event_type: 0,
            device_id: [0; MAX_STRING_LENGTH],
            device_type: 0,
            device_status: 0,
            description: [0; MAX_STRING_LENGTH],
            diagnostics: [0; DIAGNOSTICS_LENGTH],
        }
    }
}

impl Default for RawCallBackData {
    fn default() -> Self {
        Self {
            is_sd_card: 0,
            mount_path: [0; MOUNT_PATH_LENGTH],
        }
    }
}

// Sizes and offsets as laid out by a C compiler for LP64 targets.
#[cfg(target_pointer_width = "64")]
const _: () = {
    use core::mem::{offset_of, size_of};

    assert!(size_of::<RawDeviceIds>() == 1282);

    assert!(size_of::<RawDeviceInfo>() == 1176);
    assert!(offset_of!(RawDeviceInfo, device_type) == 128);
    assert!(offset_of!(RawDeviceInfo, capacity) == 136);
    assert!(offset_of!(RawDeviceInfo, status) == 144);
    assert!(offset_of!(RawDeviceInfo, partitions) == 148);
    assert!(offset_of!(RawDeviceInfo, has_smart_support) == 1172);

    assert!(size_of::<RawDeviceInfoList>() == 11768);
    assert!(offset_of!(RawDeviceInfoList, devices) == 8);

    assert!(size_of::<RawPartitionInfo>() == 544);
    assert!(offset_of!(RawPartitionInfo, status) == 512);
    assert!(offset_of!(RawPartitionInfo, capacity) == 520);
    assert!(offset_of!(RawPartitionInfo, free_space) == 528);
    assert!(offset_of!(RawPartitionInfo, is_tsb_supported) == 536);
    assert!(offset_of!(RawPartitionInfo, is_dvr_supported) == 537);

    assert!(size_of::<RawDiagAttribute>() == 256);
    assert!(size_of::<RawDiagAttributesList>() == 5122);
    assert!(size_of::<RawDiagnostics>() == 5122);

    assert!(size_of::<RawHealthInfo>() == 25744);
    assert!(offset_of!(RawHealthInfo, is_operational) == 132);
    assert!(offset_of!(RawHealthInfo, is_healthy) == 133);
    assert!(offset_of!(RawHealthInfo, diagnostics) == 134);
    assert!(offset_of!(RawHealthInfo, lifetimes_list) == 5256);
    assert!(offset_of!(RawHealthInfo, first_exceeded_configured_life) == 10378);
    assert!(offset_of!(RawHealthInfo, first_exceeded_max_life) == 15500);
    assert!(offset_of!(RawHealthInfo, health_states_list) == 20622);

    assert!(size_of::<RawEventMessage>() == 524);
    assert!(offset_of!(RawEventMessage, device_id) == 4);
    assert!(offset_of!(RawEventMessage, device_type) == 132);
    assert!(offset_of!(RawEventMessage, device_status) == 136);
    assert!(offset_of!(RawEventMessage, description) == 140);
    assert!(offset_of!(RawEventMessage, diagnostics) == 268);

    assert!(size_of::<RawCallBackData>() == 201);
    assert!(offset_of!(RawCallBackData, mount_path) == 1);
};
