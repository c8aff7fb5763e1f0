// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot-backed eMMC status HAL
//!
//! Serves a device/health observation recorded in a TOML document. Used on
//! development hosts and in tests, where there is no vendor backend, and to
//! replay a field report. Faults can be injected per query to exercise the
//! failure paths of callers.

pub mod error;
pub mod hal;
pub mod snapshot;

pub use error::{Result, SnapshotError};
pub use hal::SnapshotHal;
pub use snapshot::{DEFAULT_SNAPSHOT_PATH, Faults, SNAPSHOT_ENV, Snapshot, resolve_path};
