// SPDX-License-Identifier: GPL-3.0-only

//! Recorded device/health snapshot documents

use std::fs;
use std::path::{Path, PathBuf};

use emmc_types::{DeviceInfo, HealthInfo, ReturnCode};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapshotError};

/// Environment variable naming the snapshot file to serve
pub const SNAPSHOT_ENV: &str = "EMMC_HAL_SNAPSHOT";

/// Location used when neither a path nor [`SNAPSHOT_ENV`] is given
pub const DEFAULT_SNAPSHOT_PATH: &str = "/etc/emmc-hal/snapshot.toml";

/// Failure codes to report instead of the recorded data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faults {
    pub device_info: Option<ReturnCode>,
    pub health_info: Option<ReturnCode>,
}

/// One observation of the platform's primary storage device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub device: Option<DeviceInfo>,
    pub health: Option<HealthInfo>,
    #[serde(default)]
    pub faults: Faults,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: Snapshot = toml::from_str(&raw).map_err(|error| SnapshotError::Parse {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        snapshot.validate()?;
        tracing::debug!(
            "loaded snapshot {} (device: {}, health: {})",
            path.display(),
            snapshot.device.is_some(),
            snapshot.health.is_some()
        );
        Ok(snapshot)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let snapshot: Snapshot = toml::from_str(raw).map_err(|error| SnapshotError::Parse {
            path: PathBuf::from("<inline>"),
            reason: error.to_string(),
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(device) = &self.device
            && device.device_type.is_sentinel()
        {
            return Err(invalid("device.device_type must name a real device kind"));
        }

        if let Some(health) = &self.health
            && health.device_type.is_sentinel()
        {
            return Err(invalid("health.device_type must name a real device kind"));
        }

        if let (Some(device), Some(health)) = (&self.device, &self.health) {
            if device.device_id != health.device_id {
                return Err(invalid(format!(
                    "health.device_id '{}' does not match device.device_id '{}'",
                    health.device_id, device.device_id
                )));
            }
            if device.device_type != health.device_type {
                return Err(invalid(format!(
                    "health.device_type {} does not match device.device_type {}",
                    health.device_type, device.device_type
                )));
            }
        }

        for (name, fault) in [
            ("device_info", self.faults.device_info),
            ("health_info", self.faults.health_info),
        ] {
            if fault == Some(ReturnCode::Success) {
                return Err(invalid(format!("faults.{name} must be a failure code")));
            }
        }

        Ok(())
    }
}

/// Resolve the snapshot location: explicit path, then [`SNAPSHOT_ENV`],
/// then [`DEFAULT_SNAPSHOT_PATH`].
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(value) = std::env::var_os(SNAPSHOT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }

    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

fn invalid(reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Invalid {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emmc_types::{DeviceStatusFlag, DeviceType, Diagnostics};
    use std::io::Write;
    use std::sync::{Mutex, PoisonError};

    const HEALTHY: &str = r#"
[device]
device_id = "0x15-0x0100-4a4d4d"
device_type = "emmc_card"
capacity = 7818182656
status = 0
manufacturer = "Samsung"
model = "8GTF4R"
has_smart_support = true

[health]
device_id = "0x15-0x0100-4a4d4d"
device_type = "emmc_card"
is_operational = true
is_healthy = true

[health.diagnostics]
kind = "attributes"

[[health.diagnostics.data]]
name = "PRE_EOL_INFO"
value = "0x01"

[[health.lifetimes]]
name = "LIFE_TIME_EST_A"
value = "0x02"
"#;

    #[test]
    fn parses_a_complete_snapshot() {
        let snapshot = Snapshot::from_toml_str(HEALTHY).unwrap();
        let device = snapshot.device.as_ref().unwrap();
        assert_eq!(device.device_type, DeviceType::EmmcCard);
        assert_eq!(device.capacity, 7_818_182_656);
        assert!(device.is_ok());

        let health = snapshot.health.as_ref().unwrap();
        let Diagnostics::Attributes(list) = &health.diagnostics else {
            panic!("expected attribute diagnostics");
        };
        assert_eq!(list.value_of("PRE_EOL_INFO"), Some("0x01"));
        assert_eq!(health.lifetimes.len(), 1);
        assert_eq!(snapshot.faults, Faults::default());
    }

    #[test]
    fn status_bits_parse_as_flags() {
        let raw = HEALTHY.replace("status = 0", "status = 9");
        let snapshot = Snapshot::from_toml_str(&raw).unwrap();
        let status = snapshot.device.unwrap().status;
        assert!(status.contains(DeviceStatusFlag::ReadOnly));
        assert!(status.contains(DeviceStatusFlag::DiskFull));
    }

    #[test]
    fn rejects_mismatched_device_ids() {
        let raw = HEALTHY.replacen(
            "device_id = \"0x15-0x0100-4a4d4d\"\ndevice_type = \"emmc_card\"\nis_operational",
            "device_id = \"other\"\ndevice_type = \"emmc_card\"\nis_operational",
            1,
        );
        let err = Snapshot::from_toml_str(&raw).unwrap_err();
        assert!(matches!(err, SnapshotError::Invalid { .. }), "{err}");
    }

    #[test]
    fn rejects_sentinel_device_type() {
        let raw = "[device]\ndevice_id = \"x\"\ndevice_type = \"max\"\ncapacity = 0\n";
        assert!(matches!(
            Snapshot::from_toml_str(raw),
            Err(SnapshotError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_success_as_fault() {
        let raw = "[faults]\ndevice_info = \"success\"\n";
        assert!(matches!(
            Snapshot::from_toml_str(raw),
            Err(SnapshotError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_oversized_strings() {
        let long = "x".repeat(200);
        let raw = format!("[device]\ndevice_id = \"{long}\"\ndevice_type = \"usb\"\ncapacity = 0\n");
        assert!(matches!(
            Snapshot::from_toml_str(&raw),
            Err(SnapshotError::Parse { .. })
        ));
    }

    #[test]
    fn empty_document_is_valid() {
        let snapshot = Snapshot::from_toml_str("").unwrap();
        assert!(snapshot.device.is_none());
        assert!(snapshot.health.is_none());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEALTHY.as_bytes()).unwrap();
        let snapshot = Snapshot::load(file.path()).unwrap();
        assert!(snapshot.device.is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    // The process environment is shared; tests that change it take turns.
    static ENV: Mutex<()> = Mutex::new(());

    fn with_snapshot_env<R>(value: Option<&str>, f: impl FnOnce() -> R) -> R {
        let _guard = ENV.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = std::env::var_os(SNAPSHOT_ENV);
        // SAFETY: every test touching the environment holds `ENV`.
        unsafe {
            match value {
                Some(value) => std::env::set_var(SNAPSHOT_ENV, value),
                None => std::env::remove_var(SNAPSHOT_ENV),
            }
        }
        let result = f();
        // SAFETY: as above.
        unsafe {
            match saved {
                Some(value) => std::env::set_var(SNAPSHOT_ENV, value),
                None => std::env::remove_var(SNAPSHOT_ENV),
            }
        }
        result
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/tmp/explicit.toml");
        let resolved = with_snapshot_env(Some("/tmp/from-env.toml"), || resolve_path(Some(path)));
        assert_eq!(resolved, path);
    }

    #[test]
    fn environment_is_used_without_explicit_path() {
        let resolved = with_snapshot_env(Some("/tmp/from-env.toml"), || resolve_path(None));
        assert_eq!(resolved, Path::new("/tmp/from-env.toml"));
    }

    #[test]
    fn empty_environment_value_falls_through() {
        let resolved = with_snapshot_env(Some(""), || resolve_path(None));
        assert_eq!(resolved, Path::new(DEFAULT_SNAPSHOT_PATH));
    }

    #[test]
    fn default_path_without_environment() {
        let resolved = with_snapshot_env(None, || resolve_path(None));
        assert_eq!(resolved, Path::new(DEFAULT_SNAPSHOT_PATH));
    }
}
