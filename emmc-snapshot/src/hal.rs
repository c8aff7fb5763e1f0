// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use emmc_contracts::{EmmcHal, HalError, HalErrorKind};
use emmc_types::{DeviceInfo, HealthInfo, ReturnCode};

use crate::error::Result;
use crate::snapshot::{Snapshot, resolve_path};

/// HAL backend answering from a recorded [`Snapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotHal {
    snapshot: Snapshot,
    source: Option<PathBuf>,
}

impl SnapshotHal {
    pub fn new(snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self {
            snapshot,
            source: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let snapshot = Snapshot::load(path)?;
        tracing::info!("serving eMMC status from {}", path.display());
        Ok(Self {
            snapshot,
            source: Some(path.to_path_buf()),
        })
    }

    /// Open the snapshot at the resolved location as a HAL backend.
    ///
    /// A snapshot that cannot be loaded is an init failure.
    pub fn open(explicit: Option<&Path>) -> std::result::Result<Self, HalError> {
        Self::from_path(&resolve_path(explicit)).map_err(HalError::from)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn injected(query: &str, fault: Option<ReturnCode>) -> std::result::Result<(), HalError> {
    match fault.and_then(HalErrorKind::from_return_code) {
        Some(kind) => {
            tracing::debug!("{query}: reporting injected {kind:?} failure");
            Err(HalError::new(kind, format!("{query}: injected failure")))
        }
        None => Ok(()),
    }
}

impl EmmcHal for SnapshotHal {
    fn get_health_info(&self) -> std::result::Result<HealthInfo, HalError> {
        injected("health info", self.snapshot.faults.health_info)?;
        Ok(self
            .snapshot
            .health
            .clone()
            .unwrap_or_else(HealthInfo::absent))
    }

    fn get_device_info(&self) -> std::result::Result<DeviceInfo, HalError> {
        injected("device info", self.snapshot.faults.device_info)?;
        Ok(self
            .snapshot
            .device
            .clone()
            .unwrap_or_else(DeviceInfo::absent))
    }
}
