// SPDX-License-Identifier: GPL-3.0-only

use emmc_types::{DeviceInfo, HealthInfo, ReturnCode};

use crate::HalError;

/// Status queries for the platform's primary storage device.
///
/// Both queries are synchronous. There is no device selector: a platform
/// exposes exactly one primary device through this interface. Absence of
/// the device is reported through the `NotPresent` status bit, not an error.
pub trait EmmcHal: Send + Sync {
    fn get_health_info(&self) -> Result<HealthInfo, HalError>;

    fn get_device_info(&self) -> Result<DeviceInfo, HalError>;

    /// Out-parameter form of [`EmmcHal::get_health_info`].
    ///
    /// `out` is written only when the call returns `Success`.
    fn fill_health_info(&self, out: &mut HealthInfo) -> ReturnCode {
        match self.get_health_info() {
            Ok(health) => {
                *out = health;
                ReturnCode::Success
            }
            Err(error) => {
                tracing::warn!("health query failed: {error}");
                error.return_code()
            }
        }
    }

    /// Out-parameter form of [`EmmcHal::get_device_info`].
    ///
    /// `out` is written only when the call returns `Success`.
    fn fill_device_info(&self, out: &mut DeviceInfo) -> ReturnCode {
        match self.get_device_info() {
            Ok(device) => {
                *out = device;
                ReturnCode::Success
            }
            Err(error) => {
                tracing::warn!("device info query failed: {error}");
                error.return_code()
            }
        }
    }
}
