// SPDX-License-Identifier: GPL-3.0-only

//! Exported entry points driven through the process-wide backend.

use std::path::Path;
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use emmc_ffi::{
    CcspHalEmmcGetDeviceInfo, CcspHalEmmcGetHealthInfo, DiagnosticsView, RawDeviceInfo,
    RawHealthInfo, clear_backend, install_backend,
};
use emmc_snapshot::{Snapshot, SnapshotHal};
use emmc_types::{DeviceType, Diagnostics, ReturnCode};

// The backend registry is global; tests touching it take turns.
static REGISTRY: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn recorded() -> SnapshotHal {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../resources/snapshots/emmc-healthy.toml");
    SnapshotHal::from_path(&path).unwrap()
}

#[test]
fn reports_init_failure_without_backend() {
    let _guard = exclusive();
    clear_backend();

    let mut device = RawDeviceInfo::default();
    let mut health = RawHealthInfo::default();
    unsafe {
        assert_eq!(CcspHalEmmcGetDeviceInfo(&mut device), ReturnCode::InitFailure.code());
        assert_eq!(CcspHalEmmcGetHealthInfo(&mut health), ReturnCode::InitFailure.code());
    }
}

#[test]
fn rejects_null_output() {
    let _guard = exclusive();
    install_backend(Arc::new(recorded()));

    unsafe {
        assert_eq!(CcspHalEmmcGetDeviceInfo(ptr::null_mut()), ReturnCode::InvalidInput.code());
        assert_eq!(CcspHalEmmcGetHealthInfo(ptr::null_mut()), ReturnCode::InvalidInput.code());
    }
    clear_backend();
}

#[test]
fn serves_recorded_snapshot() {
    let _guard = exclusive();
    install_backend(Arc::new(recorded()));

    let mut raw = RawDeviceInfo::default();
    let code = unsafe { CcspHalEmmcGetDeviceInfo(&mut raw) };
    assert_eq!(code, ReturnCode::Success.code());
    let device = raw.decode().unwrap();
    assert_eq!(device.device_id.as_str(), "0x15-0x0100-4a4d4d");
    assert_eq!(device.device_type, DeviceType::EmmcCard);
    assert_eq!(device.capacity, 7_818_182_656);
    assert!(device.is_ok());
    assert!(device.has_smart_support);

    let mut raw = RawHealthInfo::default();
    let code = unsafe { CcspHalEmmcGetHealthInfo(&mut raw) };
    assert_eq!(code, ReturnCode::Success.code());
    let health = raw.decode(DiagnosticsView::Attributes).unwrap();
    assert!(health.is_good());
    assert_eq!(health.device_id, device.device_id);
    let Diagnostics::Attributes(list) = &health.diagnostics else {
        panic!("expected attribute diagnostics");
    };
    assert_eq!(list.value_of("pre_eol_info"), Some("0x01"));
    assert_eq!(health.lifetimes.len(), 2);

    clear_backend();
}

#[test]
fn injected_faults_leave_output_untouched() {
    let _guard = exclusive();
    let mut snapshot = recorded().snapshot().clone();
    snapshot.faults.device_info = Some(ReturnCode::GenericFailure);
    snapshot.faults.health_info = Some(ReturnCode::UnknownFailure);
    install_backend(Arc::new(SnapshotHal::new(snapshot).unwrap()));

    let mut device = RawDeviceInfo {
        capacity: 1,
        ..RawDeviceInfo::default()
    };
    let code = unsafe { CcspHalEmmcGetDeviceInfo(&mut device) };
    assert_eq!(code, ReturnCode::GenericFailure.code());
    assert_eq!(device.capacity, 1);

    let mut health = RawHealthInfo::default();
    let code = unsafe { CcspHalEmmcGetHealthInfo(&mut health) };
    assert_eq!(code, ReturnCode::UnknownFailure.code());
    assert_eq!(health.is_operational, 0);

    clear_backend();
}

#[test]
fn absent_device_is_reported_as_success() {
    let _guard = exclusive();
    install_backend(Arc::new(SnapshotHal::new(Snapshot::default()).unwrap()));

    let mut raw = RawDeviceInfo::default();
    let code = unsafe { CcspHalEmmcGetDeviceInfo(&mut raw) };
    assert_eq!(code, ReturnCode::Success.code());
    assert!(!raw.decode().unwrap().is_present());

    clear_backend();
}

#[test]
fn replacing_the_backend_returns_the_previous_one() {
    let _guard = exclusive();
    clear_backend();
    assert!(install_backend(Arc::new(recorded())).is_none());
    assert!(install_backend(Arc::new(recorded())).is_some());
    assert!(clear_backend().is_some());
    assert!(clear_backend().is_none());
}
