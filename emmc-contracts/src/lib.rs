// SPDX-License-Identifier: GPL-3.0-only

pub mod error;
pub mod hal;

pub use error::{HalError, HalErrorKind};
pub use hal::EmmcHal;
