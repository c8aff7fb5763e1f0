// SPDX-License-Identifier: GPL-3.0-only

//! Notification records
//!
//! Only the shape of an event is defined here. Deciding that an event is
//! due is a pure function of two observations; delivering it is left to
//! whoever consumes the HAL.

use serde::{Deserialize, Serialize};

use crate::{
    DeviceInfo, DeviceStatus, DeviceStatusFlag, DeviceType, DiagAttribute, Diagnostics,
    DiagnosticsText, EventKind, HealthInfo, ModelError, MountPath, ShortText,
};

/// A storage event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub event_type: EventKind,

    pub device_id: ShortText,

    pub device_type: DeviceType,

    pub device_status: DeviceStatus,

    pub description: ShortText,

    pub diagnostics: DiagnosticsText,
}

impl EventMessage {
    /// Event for a device whose status set differs between two observations.
    pub fn status_changed(previous: &DeviceInfo, current: &DeviceInfo) -> Option<Self> {
        if previous.status == current.status {
            return None;
        }

        let description = format!(
            "status changed from {} to {}",
            DeviceStatusFlag::describe(previous.status),
            DeviceStatusFlag::describe(current.status)
        );

        Some(Self {
            event_type: EventKind::StatusChanged,
            device_id: current.device_id.clone(),
            device_type: current.device_type,
            device_status: current.status,
            description: ShortText::truncated(&description),
            diagnostics: DiagnosticsText::default(),
        })
    }

    /// Failure event when the device is not operational, warning event when
    /// it is operational but unhealthy.
    pub fn from_health(health: &HealthInfo, status: DeviceStatus) -> Option<Self> {
        let (event_type, description) = if !health.is_operational {
            (EventKind::DeviceFailure, "device is not operational")
        } else if !health.is_healthy {
            (EventKind::HealthWarning, "device reports degraded health")
        } else {
            return None;
        };

        Some(Self {
            event_type,
            device_id: health.device_id.clone(),
            device_type: health.device_type,
            device_status: status,
            description: ShortText::truncated(description),
            diagnostics: DiagnosticsText::truncated(&summarize(health)),
        })
    }
}

fn summarize(health: &HealthInfo) -> String {
    if !health.health_states.is_empty() {
        return join_attributes(&health.health_states);
    }
    match &health.diagnostics {
        Diagnostics::Attributes(list) => join_attributes(list),
        Diagnostics::Blob(blob) => blob.text(),
    }
}

fn join_attributes(list: &[DiagAttribute]) -> String {
    list.iter()
        .map(|attr| format!("{}={}", attr.name, attr.value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Data handed to a mount notifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallBackData {
    pub is_sd_card: bool,

    pub mount_path: MountPath,
}

impl CallBackData {
    pub fn new(is_sd_card: bool, mount_path: &str) -> Result<Self, ModelError> {
        Ok(Self {
            is_sd_card,
            mount_path: MountPath::new(mount_path)?,
        })
    }

    pub fn for_device(device: &DeviceInfo, mount_path: &str) -> Result<Self, ModelError> {
        Self::new(device.device_type == DeviceType::SdCard, mount_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{DIAGNOSTICS_LENGTH, MOUNT_PATH_LENGTH};
    use crate::{DiagAttributeList, DiagnosticsBlob};

    fn device(status: DeviceStatus) -> DeviceInfo {
        DeviceInfo {
            device_id: ShortText::new("emmc0").unwrap(),
            status,
            ..DeviceInfo::default()
        }
    }

    fn health(is_operational: bool, is_healthy: bool) -> HealthInfo {
        HealthInfo {
            device_id: ShortText::new("emmc0").unwrap(),
            is_operational,
            is_healthy,
            ..HealthInfo::default()
        }
    }

    #[test]
    fn no_event_for_unchanged_status() {
        let a = device(DeviceStatus::empty());
        assert!(EventMessage::status_changed(&a, &a.clone()).is_none());
    }

    #[test]
    fn status_change_carries_the_new_status() {
        let before = device(DeviceStatus::empty());
        let after = device(DeviceStatusFlag::ReadOnly.into());
        let event = EventMessage::status_changed(&before, &after).unwrap();
        assert_eq!(event.event_type, EventKind::StatusChanged);
        assert_eq!(event.device_status, after.status);
        assert_eq!(
            event.description.as_str(),
            "status changed from ok to read_only"
        );
    }

    #[test]
    fn health_events_by_severity() {
        assert!(EventMessage::from_health(&health(true, true), DeviceStatus::empty()).is_none());

        let warning = EventMessage::from_health(&health(true, false), DeviceStatus::empty()).unwrap();
        assert_eq!(warning.event_type, EventKind::HealthWarning);

        let failure = EventMessage::from_health(
            &health(false, false),
            DeviceStatusFlag::ReadFailure.into(),
        )
        .unwrap();
        assert_eq!(failure.event_type, EventKind::DeviceFailure);
        assert_eq!(
            failure.device_status,
            DeviceStatus::from(DeviceStatusFlag::ReadFailure)
        );
    }

    #[test]
    fn health_event_diagnostics_prefer_health_states() {
        let mut info = health(true, false);
        info.diagnostics = Diagnostics::Attributes(
            DiagAttributeList::try_from(vec![DiagAttribute::new("A", "1").unwrap()]).unwrap(),
        );
        info.health_states
            .push(DiagAttribute::new("PRE_EOL_INFO", "0x02").unwrap())
            .unwrap();
        let event = EventMessage::from_health(&info, DeviceStatus::empty()).unwrap();
        assert_eq!(event.diagnostics.as_str(), "PRE_EOL_INFO=0x02");

        info.health_states = DiagAttributeList::new();
        info.diagnostics = Diagnostics::Blob(DiagnosticsBlob::new(vec![b'x'; 2048]).unwrap());
        let event = EventMessage::from_health(&info, DeviceStatus::empty()).unwrap();
        assert_eq!(event.diagnostics.len(), DIAGNOSTICS_LENGTH - 1);
    }

    #[test]
    fn callback_data_flags_sd_cards() {
        let mut sd = device(DeviceStatus::empty());
        sd.device_type = DeviceType::SdCard;
        let data = CallBackData::for_device(&sd, "/media/sdcard").unwrap();
        assert!(data.is_sd_card);
        assert_eq!(data.mount_path.as_str(), "/media/sdcard");

        assert!(CallBackData::new(false, &"m".repeat(MOUNT_PATH_LENGTH)).is_err());
    }
}
