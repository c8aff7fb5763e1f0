// SPDX-License-Identifier: GPL-3.0-only

//! Backend behind the exported C entry points
//!
//! The C interface has no context argument, so the backend serving it is
//! process-wide. Rust callers should hold an `EmmcHal` directly instead.

use std::sync::{Arc, PoisonError, RwLock};

use emmc_contracts::EmmcHal;

static BACKEND: RwLock<Option<Arc<dyn EmmcHal>>> = RwLock::new(None);

/// Serve the C entry points from `backend`, returning the one it replaces.
pub fn install_backend(backend: Arc<dyn EmmcHal>) -> Option<Arc<dyn EmmcHal>> {
    tracing::info!("eMMC HAL backend installed");
    BACKEND
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(backend)
}

/// Detach the current backend; the C entry points report `InitFailure` until
/// another one is installed.
pub fn clear_backend() -> Option<Arc<dyn EmmcHal>> {
    BACKEND
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

pub fn current_backend() -> Option<Arc<dyn EmmcHal>> {
    BACKEND
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
