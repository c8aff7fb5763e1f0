// SPDX-License-Identifier: GPL-3.0-only

//! Formatting helpers shared by the model types

use num_format::{Locale, ToFormattedString};

/// Convert bytes to human-readable format (e.g., "7.28 GB")
pub fn bytes_to_pretty(bytes: u64, add_bytes: bool) -> String {
    let mut steps = 0;
    let mut val: f64 = bytes as f64;

    while val > 1024. && steps < 6 {
        val /= 1024.;
        steps += 1;
    }

    let unit = match steps {
        0 => "B",
        1 => "KB",
        2 => "MB",
        3 => "GB",
        4 => "TB",
        5 => "PB",
        _ => "EB",
    };

    if add_bytes {
        let bytes_str = bytes.to_formatted_string(&Locale::en);
        format!("{:.2} {} ({} bytes)", val, unit, bytes_str)
    } else {
        format!("{:.2} {}", val, unit)
    }
}
