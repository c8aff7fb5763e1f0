// SPDX-License-Identifier: GPL-3.0-only

//! C ABI of the eMMC status HAL
//!
//! `raw` holds the `#[repr(C)]` mirrors of the platform header and `convert`
//! moves data between them and the typed model in `emmc-types`. The exported
//! `CcspHalEmmcGetHealthInfo` and `CcspHalEmmcGetDeviceInfo` symbols are
//! served by whichever backend was last passed to [`install_backend`].

pub mod convert;
pub mod exports;
pub mod raw;
pub mod registry;

pub use convert::DiagnosticsView;
pub use exports::{
    CcspHalEmmcGetDeviceInfo, CcspHalEmmcGetHealthInfo, query_device_info, query_health_info,
};
pub use raw::{
    CBool, RawCallBackData, RawDeviceIds, RawDeviceInfo, RawDeviceInfoList, RawDiagAttribute,
    RawDiagAttributesList, RawDiagnostics, RawEventMessage, RawHealthInfo, RawPartitionInfo,
};
pub use registry::{clear_backend, current_backend, install_backend};
