// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for the eMMC status HAL
//!
//! This crate defines the single source of truth for every record that
//! crosses the HAL boundary:
//!
//! - **emmc-contracts**: the `EmmcHal` trait returns these types directly
//! - **emmc-ffi**: encodes/decodes them to the fixed C layouts of the platform header
//! - **emmc-status**: prints and checks them
//!
//! ## Capacities
//!
//! The platform header uses fixed-size arrays everywhere. Here every string
//! is a [`BoundedString`] and every list a [`BoundedVec`], owned and
//! explicit-length but bounded to the same capacities so that any value
//! that validates can be encoded on the wire without truncation.

pub mod bounded;
pub mod common;
pub mod device;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod health;
pub mod limits;
pub mod partition;
pub mod status;
pub mod text;

pub use bounded::BoundedVec;
pub use common::bytes_to_pretty;
pub use device::{DeviceIdList, DeviceInfo, DeviceInfoList};
pub use diagnostics::{DiagAttribute, DiagAttributeList, Diagnostics, DiagnosticsBlob};
pub use error::ModelError;
pub use event::{CallBackData, EventMessage};
pub use health::HealthInfo;
pub use limits::{
    DIAGNOSTICS_BLOB_LENGTH, DIAGNOSTICS_LENGTH, MAX_DEVICES, MAX_DIAGNOSTIC_ATTRIBUTES,
    MAX_STRING_LENGTH, MOUNT_PATH_LENGTH, PARTITION_LENGTH,
};
pub use partition::PartitionInfo;
pub use status::{DeviceStatus, DeviceStatusFlag, DeviceType, EventKind, ReturnCode};
pub use text::{BoundedString, DiagnosticsText, MountPath, PartitionsText, ShortText};
