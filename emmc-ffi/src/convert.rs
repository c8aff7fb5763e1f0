// SPDX-License-Identifier: GPL-3.0-only

//! Conversions between the model types and the C layouts
//!
//! Encoding never fails: every model value already fits its field.
//! Decoding validates what a C producer may have gotten wrong: missing
//! terminators, out-of-range enumerations and counts past their array.
//! Any nonzero boolean byte reads as true.
//!
//! Text that is not UTF-8 is decoded lossily and is not an error. Each
//! invalid byte becomes a three-byte U+FFFD, so the replaced text can outgrow
//! the field; it is then cut at a char boundary to fit, and whatever followed
//! is lost. Callers that need the exact bytes must read the raw array.

use emmc_types::limits::{DIAGNOSTICS_BLOB_LENGTH, MAX_DEVICES, MAX_DIAGNOSTIC_ATTRIBUTES};
use emmc_types::{
    BoundedString, CallBackData, DeviceIdList, DeviceInfo, DeviceInfoList, DeviceStatus,
    DeviceStatusFlag, DeviceType, DiagAttribute, DiagAttributeList, Diagnostics,
    DiagnosticsBlob, EventKind, EventMessage, HealthInfo, ModelError, PartitionInfo,
};
use libc::{c_char, c_int, c_ushort};

use crate::raw::{
    CBool, RawCallBackData, RawDeviceIds, RawDeviceInfo, RawDeviceInfoList,
    RawDiagAttributesList, RawDiagnostics, RawEventMessage, RawHealthInfo, RawPartitionInfo,
};

/// Which member of the health diagnostics union holds the data.
///
/// The C layout carries no discriminant; producer and consumer agree on
/// it out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsView {
    Attributes,
    Blob,
}

pub(crate) fn encode_str<const N: usize>(text: &BoundedString<N>, out: &mut [c_char; N]) {
    out.fill(0);
    for (dst, src) in out.iter_mut().zip(text.as_bytes()) {
        *dst = *src as c_char;
    }
}

/// Text up to the first NUL; lossy and possibly shortened, see the module docs.
pub(crate) fn decode_str<const N: usize>(raw: &[c_char; N]) -> Result<BoundedString<N>, ModelError> {
    let bytes: Vec<u8> = raw.iter().map(|c| *c as u8).collect();
    let Some(end) = bytes.iter().position(|b| *b == 0) else {
        return Err(ModelError::MissingNul { capacity: N });
    };
    Ok(BoundedString::truncated(&String::from_utf8_lossy(&bytes[..end])))
}

fn encode_status(status: DeviceStatus) -> c_int {
    status.bits() as c_int
}

fn decode_status(raw: c_int) -> Result<DeviceStatus, ModelError> {
    DeviceStatusFlag::decode(raw as u32)
}

fn checked_count(what: &'static str, count: c_ushort, capacity: usize) -> Result<usize, ModelError> {
    let len = usize::from(count);
    if len > capacity {
        return Err(ModelError::CapacityExceeded {
            what,
            len,
            capacity,
        });
    }
    Ok(len)
}

impl RawDeviceInfo {
    pub fn encode(device: &DeviceInfo) -> Self {
        let mut raw = Self::default();
        encode_str(&device.device_id, &mut raw.device_id);
        raw.device_type = device.device_type.code();
        raw.capacity = device.capacity;
        raw.status = encode_status(device.status);
        encode_str(&device.partitions, &mut raw.partitions);
        encode_str(&device.manufacturer, &mut raw.manufacturer);
        encode_str(&device.model, &mut raw.model);
        encode_str(&device.serial_number, &mut raw.serial_number);
        encode_str(&device.firmware_version, &mut raw.firmware_version);
        encode_str(&device.hw_version, &mut raw.hw_version);
        encode_str(&device.ata_standard, &mut raw.if_ata_standard);
        raw.has_smart_support = CBool::from(device.has_smart_support);
        raw
    }

    pub fn decode(&self) -> Result<DeviceInfo, ModelError> {
        Ok(DeviceInfo {
            device_id: decode_str(&self.device_id)?,
            device_type: DeviceType::try_from(self.device_type)?,
            capacity: self.capacity,
            status: decode_status(self.status)?,
            partitions: decode_str(&self.partitions)?,
            manufacturer: decode_str(&self.manufacturer)?,
            model: decode_str(&self.model)?,
            serial_number: decode_str(&self.serial_number)?,
            firmware_version: decode_str(&self.firmware_version)?,
            hw_version: decode_str(&self.hw_version)?,
            ata_standard: decode_str(&self.if_ata_standard)?,
            has_smart_support: self.has_smart_support != 0,
        })
    }
}

impl RawDeviceInfoList {
    pub fn encode(devices: &DeviceInfoList) -> Self {
        let mut raw = Self::default();
        raw.num_of_devices = devices.len() as c_ushort;
        for (slot, device) in raw.devices.iter_mut().zip(devices.iter()) {
            *slot = RawDeviceInfo::encode(device);
        }
        raw
    }

    pub fn decode(&self) -> Result<DeviceInfoList, ModelError> {
        let len = checked_count("device list", self.num_of_devices, MAX_DEVICES)?;
        let devices = self.devices[..len]
            .iter()
            .map(RawDeviceInfo::decode)
            .collect::<Result<Vec<_>, _>>()?;
        DeviceInfoList::try_from(devices)
    }
}

impl RawDeviceIds {
    pub fn encode(ids: &DeviceIdList) -> Self {
        let mut raw = Self::default();
        raw.num_of_devices = ids.len() as c_ushort;
        for (slot, id) in raw.device_ids.iter_mut().zip(ids.iter()) {
            encode_str(id, slot);
        }
        raw
    }

    pub fn decode(&self) -> Result<DeviceIdList, ModelError> {
        let len = checked_count("device ID list", self.num_of_devices, MAX_DEVICES)?;
        let ids = self.device_ids[..len]
            .iter()
            .map(decode_str)
            .collect::<Result<Vec<_>, _>>()?;
        DeviceIdList::try_from(ids)
    }
}

impl RawPartitionInfo {
    pub fn encode(partition: &PartitionInfo) -> Self {
        let mut raw = Self::default();
        encode_str(&partition.partition_id, &mut raw.partition_id);
        encode_str(&partition.name, &mut raw.name);
        encode_str(&partition.mount_path, &mut raw.mount_path);
        encode_str(&partition.format, &mut raw.format);
        raw.status = encode_status(partition.status);
        raw.capacity = partition.capacity;
        raw.free_space = partition.free_space;
        raw.is_tsb_supported = CBool::from(partition.is_tsb_supported);
        raw.is_dvr_supported = CBool::from(partition.is_dvr_supported);
        raw
    }

    pub fn decode(&self) -> Result<PartitionInfo, ModelError> {
        Ok(PartitionInfo {
            partition_id: decode_str(&self.partition_id)?,
            name: decode_str(&self.name)?,
            mount_path: decode_str(&self.mount_path)?,
            format: decode_str(&self.format)?,
            status: decode_status(self.status)?,
            capacity: self.capacity,
            free_space: self.free_space,
            is_tsb_supported: self.is_tsb_supported != 0,
            is_dvr_supported: self.is_dvr_supported != 0,
        })
    }
}

impl RawDiagAttributesList {
    pub fn encode(list: &DiagAttributeList) -> Self {
        let mut raw = Self::default();
        raw.num_of_attributes = list.len() as c_ushort;
        for (slot, attr) in raw.diagnostics.iter_mut().zip(list.iter()) {
            encode_str(&attr.name, &mut slot.name);
            encode_str(&attr.value, &mut slot.value);
        }
        raw
    }

    pub fn decode(&self) -> Result<DiagAttributeList, ModelError> {
        let len = checked_count(
            "diagnostics attribute list",
            self.num_of_attributes,
            MAX_DIAGNOSTIC_ATTRIBUTES,
        )?;
        let attributes = self.diagnostics[..len]
            .iter()
            .map(|attr| {
                Ok(DiagAttribute {
                    name: decode_str(&attr.name)?,
                    value: decode_str(&attr.value)?,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;
        DiagAttributeList::try_from(attributes)
    }
}

impl RawDiagnostics {
    pub fn encode(diagnostics: &Diagnostics) -> Self {
        let mut raw = Self::default();
        match diagnostics {
            Diagnostics::Attributes(list) => raw.list = RawDiagAttributesList::encode(list),
            Diagnostics::Blob(blob) => {
                let mut bytes = [0 as c_char; DIAGNOSTICS_BLOB_LENGTH];
                for (dst, src) in bytes.iter_mut().zip(blob.as_bytes()) {
                    *dst = *src as c_char;
                }
                // Bytes past the blob keep the zeroes written by `default`.
                raw.blob = bytes;
            }
        }
        raw
    }

    /// Read the union through `view`.
    ///
    /// The blob view reads at most [`DIAGNOSTICS_BLOB_LENGTH`] bytes and
    /// drops trailing NULs; the list view honours at most
    /// [`MAX_DIAGNOSTIC_ATTRIBUTES`] entries whatever the count says.
    pub fn decode(&self, view: DiagnosticsView) -> Result<Diagnostics, ModelError> {
        match view {
            DiagnosticsView::Attributes => {
                // SAFETY: both members are plain integers and byte arrays,
                // valid for any bit pattern, and the storage is always fully
                // initialized (see `Default`).
                let list = unsafe { &self.list };
                Ok(Diagnostics::Attributes(list.decode()?))
            }
            DiagnosticsView::Blob => {
                // SAFETY: as above; the blob member is the shorter one.
                let blob = unsafe { &self.blob };
                let end = blob.iter().rposition(|c| *c != 0).map_or(0, |i| i + 1);
                let bytes = blob[..end].iter().map(|c| *c as u8).collect();
                Ok(Diagnostics::Blob(DiagnosticsBlob::new(bytes)?))
            }
        }
    }
}

impl RawHealthInfo {
    pub fn encode(health: &HealthInfo) -> Self {
        let mut raw = Self::default();
        encode_str(&health.device_id, &mut raw.device_id);
        raw.device_type = health.device_type.code();
        raw.is_operational = CBool::from(health.is_operational);
        raw.is_healthy = CBool::from(health.is_healthy);
        raw.diagnostics = RawDiagnostics::encode(&health.diagnostics);
        raw.lifetimes_list = RawDiagAttributesList::encode(&health.lifetimes);
        raw.first_exceeded_configured_life =
            RawDiagAttributesList::encode(&health.first_exceeded_configured_life);
        raw.first_exceeded_max_life = RawDiagAttributesList::encode(&health.first_exceeded_max_life);
        raw.health_states_list = RawDiagAttributesList::encode(&health.health_states);
        raw
    }

    pub fn decode(&self, view: DiagnosticsView) -> Result<HealthInfo, ModelError> {
        Ok(HealthInfo {
            device_id: decode_str(&self.device_id)?,
            device_type: DeviceType::try_from(self.device_type)?,
            is_operational: self.is_operational != 0,
            is_healthy: self.is_healthy != 0,
            diagnostics: self.diagnostics.decode(view)?,
            lifetimes: self.lifetimes_list.decode()?,
            first_exceeded_configured_life: self.first_exceeded_configured_life.decode()?,
            first_exceeded_max_life: self.first_exceeded_max_life.decode()?,
            health_states: self.health_states_list.decode()?,
        })
    }
}

impl RawEventMessage {
    pub fn encode(event: &EventMessage) -> Self {
        let mut raw = Self::default();
        raw.event_type = event.event_type.code();
        encode_str(&event.device_id, &mut raw.device_id);
        raw.device_type = event.device_type.code();
        raw.device_status = encode_status(event.device_status);
        encode_str(&event.description, &mut raw.description);
        encode_str(&event.diagnostics, &mut raw.diagnostics);
        raw
    }

    pub fn decode(&self) -> Result<EventMessage, ModelError> {
        Ok(EventMessage {
            event_type: EventKind::try_from(self.event_type)?,
            device_id: decode_str(&self.device_id)?,
            device_type: DeviceType::try_from(self.device_type)?,
            device_status: decode_status(self.device_status)?,
            description: decode_str(&self.description)?,
            diagnostics: decode_str(&self.diagnostics)?,
        })
    }
}

impl RawCallBackData {
    pub fn encode(data: &CallBackData) -> Self {
        let mut raw = Self::default();
        raw.is_sd_card = CBool::from(data.is_sd_card);
        encode_str(&data.mount_path, &mut raw.mount_path);
        raw
    }

    pub fn decode(&self) -> Result<CallBackData, ModelError> {
        Ok(CallBackData {
            is_sd_card: self.is_sd_card != 0,
            mount_path: decode_str(&self.mount_path)?,
        })
    }
}
