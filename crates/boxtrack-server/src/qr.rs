// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QR payload composition and SVG rendering.
//!
//! The payload format is the pipe-joined field list scan devices expect:
//! `BOX_ID|TYPE|CYCLE_COUNT|LOCATION|LAST_USED|MFG_DATE`. Codes are
//! generated at error correction level H and rendered as an SVG data URL.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::BoxRecord;

/// Compose the scan payload for a box, optionally overriding the stored
/// location with one entered at print time.
pub fn qr_payload(record: &BoxRecord, location_override: Option<&str>) -> String {
    let location = location_override
        .map(str::to_string)
        .or_else(|| record.location.clone())
        .unwrap_or_default();
    [
        record.box_id.as_str(),
        &record.box_type.to_string(),
        &record.cycle_count.to_string(),
        &location,
        record.last_used.as_deref().unwrap_or(""),
        &record.manufacture_date,
    ]
    .join("|")
}

/// Render a payload as an `image/svg+xml` base64 data URL.
pub fn qr_svg_data_url(payload: &str) -> Result<String, BoxtrackError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| BoxtrackError::Internal(format!("qr generation failed: {e}")))?;
    let svg = code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(svg.as_bytes())
    ))
}
