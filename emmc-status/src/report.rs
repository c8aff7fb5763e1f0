// SPDX-License-Identifier: GPL-3.0-only

//! Text rendering and event evaluation for the CLI

use std::fmt::Write as _;

use emmc_types::{
    DeviceInfo, DeviceStatus, DeviceStatusFlag, DiagAttribute, Diagnostics, EventKind,
    EventMessage, HealthInfo,
};
use serde::Serialize;

/// Outcome of `emmc-status check`
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub device: DeviceInfo,
    pub health: HealthInfo,
    pub events: Vec<EventMessage>,
}

impl CheckReport {
    /// Events due for one observation. The status baseline is a device
    /// with no condition flags set.
    pub fn evaluate(device: DeviceInfo, health: HealthInfo) -> Self {
        let nominal = DeviceInfo {
            status: DeviceStatus::empty(),
            ..device.clone()
        };

        let events = EventMessage::status_changed(&nominal, &device)
            .into_iter()
            .chain(EventMessage::from_health(&health, device.status))
            .collect();

        Self {
            device,
            health,
            events,
        }
    }

    /// A failure or health warning is pending.
    pub fn is_failing(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event.event_type,
                EventKind::DeviceFailure | EventKind::HealthWarning
            )
        })
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn event_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::StatusChanged => "status",
        EventKind::HealthWarning => "warning",
        EventKind::DeviceFailure => "failure",
    }
}

fn push_attributes(out: &mut String, title: &str, list: &[DiagAttribute]) {
    if list.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for attr in list {
        let _ = writeln!(out, "  {:<28} {}", attr.name.as_str(), attr.value);
    }
}

pub fn render_device(device: &DeviceInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Device:      {}", device.display_name());
    let _ = writeln!(out, "ID:          {}", or_dash(&device.device_id));
    let _ = writeln!(out, "Type:        {}", device.device_type);
    let _ = writeln!(out, "Capacity:    {}", device.capacity_pretty());
    let _ = writeln!(out, "Status:      {}", DeviceStatusFlag::describe(device.status));
    let _ = writeln!(out, "Partitions:  {}", or_dash(&device.partitions));
    let _ = writeln!(out, "Serial:      {}", or_dash(&device.serial_number));
    let _ = writeln!(out, "Firmware:    {}", or_dash(&device.firmware_version));
    let _ = writeln!(out, "Hardware:    {}", or_dash(&device.hw_version));
    if !device.ata_standard.is_empty() {
        let _ = writeln!(out, "ATA:         {}", device.ata_standard);
    }
    let _ = writeln!(out, "SMART:       {}", yes_no(device.has_smart_support));
    out
}

pub fn render_health(health: &HealthInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:          {}", or_dash(&health.device_id));
    let _ = writeln!(out, "Type:        {}", health.device_type);
    let _ = writeln!(out, "Operational: {}", yes_no(health.is_operational));
    let _ = writeln!(out, "Healthy:     {}", yes_no(health.is_healthy));

    match &health.diagnostics {
        Diagnostics::Attributes(list) => push_attributes(&mut out, "Diagnostics", list),
        Diagnostics::Blob(blob) if !blob.is_empty() => {
            let _ = writeln!(out, "Diagnostics ({} bytes):", blob.len());
            let _ = writeln!(out, "  {}", blob.text());
        }
        Diagnostics::Blob(_) => {}
    }

    push_attributes(&mut out, "Lifetimes", &health.lifetimes);
    push_attributes(
        &mut out,
        "Exceeded configured life",
        &health.first_exceeded_configured_life,
    );
    push_attributes(&mut out, "Exceeded max life", &health.first_exceeded_max_life);
    push_attributes(&mut out, "Health states", &health.health_states);
    out
}

pub fn render_check(report: &CheckReport) -> String {
    let mut out = String::new();
    if report.events.is_empty() {
        let _ = writeln!(out, "{}: ok", report.device.display_name());
        return out;
    }

    for event in &report.events {
        let _ = write!(
            out,
            "[{}] {}: {}",
            event_label(event.event_type),
            or_dash(&event.device_id),
            event.description
        );
        if !event.diagnostics.is_empty() {
            let _ = write!(out, " ({})", event.diagnostics);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use emmc_types::{DeviceType, DiagAttributeList, DiagnosticsBlob, ShortText};

    fn device() -> DeviceInfo {
        DeviceInfo {
            device_id: ShortText::new("emmc0").unwrap(),
            device_type: DeviceType::EmmcCard,
            capacity: 7_818_182_656,
            manufacturer: ShortText::new("Samsung").unwrap(),
            model: ShortText::new("8GTF4R").unwrap(),
            ..DeviceInfo::default()
        }
    }

    fn health(is_operational: bool, is_healthy: bool) -> HealthInfo {
        HealthInfo {
            device_id: ShortText::new("emmc0").unwrap(),
            is_operational,
            is_healthy,
            ..HealthInfo::default()
        }
    }

    #[test]
    fn healthy_device_has_no_events() {
        let report = CheckReport::evaluate(device(), health(true, true));
        assert!(report.events.is_empty());
        assert!(!report.is_failing());
        assert_eq!(render_check(&report), "Samsung 8GTF4R: ok\n");
    }

    #[test]
    fn status_flags_alone_are_not_failing() {
        let device = DeviceInfo {
            status: DeviceStatusFlag::ReadOnly.into(),
            ..device()
        };
        let report = CheckReport::evaluate(device, health(true, true));
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].event_type, EventKind::StatusChanged);
        assert!(!report.is_failing());
        assert!(render_check(&report).contains("status changed from ok to read_only"));
    }

    #[test]
    fn unhealthy_device_is_failing() {
        let mut unhealthy = health(true, false);
        unhealthy.health_states =
            DiagAttributeList::try_from(vec![DiagAttribute::new("PRE_EOL", "urgent").unwrap()])
                .unwrap();
        let report = CheckReport::evaluate(device(), unhealthy);
        assert!(report.is_failing());
        let text = render_check(&report);
        assert!(text.starts_with("[warning] emmc0:"), "{text}");
        assert!(text.contains("(PRE_EOL=urgent)"), "{text}");
    }

    #[test]
    fn non_operational_device_is_failing() {
        let report = CheckReport::evaluate(device(), health(false, false));
        assert_eq!(report.events[0].event_type, EventKind::DeviceFailure);
        assert!(report.is_failing());
    }

    #[test]
    fn device_text_includes_pretty_capacity() {
        let text = render_device(&device());
        assert!(text.contains("Capacity:    7.28 GB (7,818,182,656 bytes)"), "{text}");
        assert!(text.contains("Status:      ok"));
        assert!(text.contains("Serial:      -"));
        assert!(!text.contains("ATA:"));
    }

    #[test]
    fn health_text_shows_blob_diagnostics() {
        let health = HealthInfo {
            diagnostics: Diagnostics::Blob(DiagnosticsBlob::from_text("EOL=normal").unwrap()),
            ..health(true, true)
        };
        let text = render_health(&health);
        assert!(text.contains("Operational: yes"));
        assert!(text.contains("Diagnostics (10 bytes):\n  EOL=normal\n"), "{text}");
    }
}
