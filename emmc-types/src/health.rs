// SPDX-License-Identifier: GPL-3.0-only

//! Per-device health snapshot

use serde::{Deserialize, Serialize};

use crate::{DiagAttributeList, Diagnostics, DeviceType, ShortText};

/// SMART/health information for the storage device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    /// Unique identifier or serial number (vendor specific)
    pub device_id: ShortText,

    pub device_type: DeviceType,

    pub is_operational: bool,

    pub is_healthy: bool,

    /// Structured attributes or an opaque blob
    #[serde(default)]
    pub diagnostics: Diagnostics,

    /// Lifetime counters
    #[serde(default)]
    pub lifetimes: DiagAttributeList,

    /// Attributes that first exceeded the configured life
    #[serde(default)]
    pub first_exceeded_configured_life: DiagAttributeList,

    /// Attributes that first exceeded the maximum life
    #[serde(default)]
    pub first_exceeded_max_life: DiagAttributeList,

    #[serde(default)]
    pub health_states: DiagAttributeList,
}

impl HealthInfo {
    /// Record for a platform where no storage device could be found.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Operational and healthy.
    pub fn is_good(&self) -> bool {
        self.is_operational && self.is_healthy
    }

    /// Whether any attribute has passed its configured or maximum life.
    pub fn has_exceeded_life(&self) -> bool {
        !self.first_exceeded_configured_life.is_empty() || !self.first_exceeded_max_life.is_empty()
    }
}
