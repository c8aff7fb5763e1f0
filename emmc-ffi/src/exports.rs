// SPDX-License-Identifier: GPL-3.0-only

//! Exported HAL entry points
//!
//! Output structures are owned by the caller and written only on success.
//! A panic in the backend never unwinds into C; it is reported as
//! `UnknownFailure`.

use std::panic::{self, AssertUnwindSafe};

use emmc_contracts::{EmmcHal, HalError};
use emmc_types::ReturnCode;
use libc::c_int;

use crate::raw::{RawDeviceInfo, RawHealthInfo};
use crate::registry::current_backend;

fn query<T>(
    what: &str,
    backend: Option<&dyn EmmcHal>,
    out: *mut T,
    fetch: impl FnOnce(&dyn EmmcHal) -> Result<T, HalError>,
) -> Result<(*mut T, T), ReturnCode> {
    if out.is_null() {
        tracing::warn!("{what}: null output pointer");
        return Err(ReturnCode::InvalidInput);
    }

    let Some(backend) = backend else {
        tracing::warn!("{what}: no backend installed");
        return Err(ReturnCode::InitFailure);
    };

    match panic::catch_unwind(AssertUnwindSafe(|| fetch(backend))) {
        Ok(Ok(value)) => Ok((out, value)),
        Ok(Err(error)) => {
            tracing::warn!("{what}: {error}");
            Err(error.return_code())
        }
        Err(_) => {
            tracing::error!("{what}: backend panicked");
            Err(ReturnCode::UnknownFailure)
        }
    }
}

/// Populate `out` with the health of the primary storage device.
///
/// # Safety
///
/// `out` must be null or valid for writing one `RawHealthInfo`.
pub unsafe fn query_health_info(
    backend: Option<&dyn EmmcHal>,
    out: *mut RawHealthInfo,
) -> ReturnCode {
    let fetched = query("health info", backend, out, |hal| {
        hal.get_health_info().map(|health| RawHealthInfo::encode(&health))
    });
    match fetched {
        Ok((out, raw)) => {
            // SAFETY: non-null, and valid for writes per the caller contract.
            unsafe { out.write(raw) };
            ReturnCode::Success
        }
        Err(code) => code,
    }
}

/// Populate `out` with the identity of the primary storage device.
///
/// # Safety
///
/// `out` must be null or valid for writing one `RawDeviceInfo`.
pub unsafe fn query_device_info(
    backend: Option<&dyn EmmcHal>,
    out: *mut RawDeviceInfo,
) -> ReturnCode {
    let fetched = query("device info", backend, out, |hal| {
        hal.get_device_info().map(|device| RawDeviceInfo::encode(&device))
    });
    match fetched {
        Ok((out, raw)) => {
            // SAFETY: non-null, and valid for writes per the caller contract.
            unsafe { out.write(raw) };
            ReturnCode::Success
        }
        Err(code) => code,
    }
}

/// `eSTMGRReturns CcspHalEmmcGetHealthInfo(eSTMGRHealthInfo*)`
///
/// # Safety
///
/// `p_health_info` must be null or point to writable, caller-owned storage
/// for one `eSTMGRHealthInfo`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn CcspHalEmmcGetHealthInfo(p_health_info: *mut RawHealthInfo) -> c_int {
    let backend = current_backend();
    // SAFETY: forwarded caller contract.
    unsafe { query_health_info(backend.as_deref(), p_health_info) }.code()
}

/// `eSTMGRReturns CcspHalEmmcGetDeviceInfo(eSTMGRDeviceInfo*)`
///
/// # Safety
///
/// `p_device_info` must be null or point to writable, caller-owned storage
/// for one `eSTMGRDeviceInfo`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn CcspHalEmmcGetDeviceInfo(p_device_info: *mut RawDeviceInfo) -> c_int {
    let backend = current_backend();
    // SAFETY: forwarded caller contract.
    unsafe { query_device_info(backend.as_deref(), p_device_info) }.code()
}
