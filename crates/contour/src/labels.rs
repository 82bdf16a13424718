//! Contour label text and placement.

use surface_common::{LabelSpot, Point2};

/// Format a level value for display.
///
/// The decimal count follows the data range magnitude, so every label on
/// one surface carries the same precision; trailing zeros (and a bare
/// trailing point) are trimmed. Log-space levels are de-logged first.
pub fn format_level(value: f64, range: f64, log_base: Option<f64>) -> String {
    let value = match log_base {
        Some(b) => b.powf(value),
        None => value,
    };
    let decimals = decimals_for_range(match log_base {
        Some(_) => value.abs().max(1e-12),
        None => range,
    });
    let text = format!("{:.*}", decimals, value);
    cleanup_zeros(text)
}

/// Decimals by range magnitude: wide ranges label whole numbers, narrow
/// ones keep enough digits to tell adjacent levels apart.
pub fn decimals_for_range(range: f64) -> usize {
    let range = range.abs();
    if range >= 100.0 {
        0
    } else if range >= 10.0 {
        1
    } else if range >= 1.0 {
        2
    } else if range >= 0.01 {
        3
    } else {
        5
    }
}

/// Trim trailing zeros after the decimal point, and the point itself
/// when nothing remains behind it.
fn cleanup_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Place label spots along a polyline, one every `spacing` of arc
/// length, starting half a spacing in. The spot angle follows the local
/// segment direction, flipped when the text would read upside down.
pub fn label_spots(points: &[Point2], spacing: f64) -> Vec<LabelSpot> {
    if points.len() < 2 || !(spacing > 0.0) {
        return Vec::new();
    }
    let mut spots = Vec::new();
    let mut next_at = spacing * 0.5;
    let mut walked = 0.0;

    for w in points.windows(2) {
        let (p1, p2) = (w[0], w[1]);
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        let seg_len = (dx * dx + dy * dy).sqrt();
        if seg_len <= 0.0 {
            continue;
        }
        while walked + seg_len >= next_at {
            let t = (next_at - walked) / seg_len;
            let mut angle = dy.atan2(dx);
            if angle > std::f64::consts::FRAC_PI_2 {
                angle -= std::f64::consts::PI;
            } else if angle < -std::f64::consts::FRAC_PI_2 {
                angle += std::f64::consts::PI;
            }
            spots.push(LabelSpot {
                x: p1.x + t * dx,
                y: p1.y + t * dy,
                angle,
            });
            next_at += spacing;
        }
        walked += seg_len;
    }
    spots
}
