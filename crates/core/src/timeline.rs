//! Linear date-to-percentage mapping for Gantt and calendar timeline views.
//!
//! An item spanning `[start, end]` (inclusive dates) is positioned inside a
//! visible window `[window_start, window_end]` as an offset and width, both
//! expressed as percentages of the window. The SPA renders these directly as
//! CSS `left`/`width` values, so all clamping happens here.

use serde::Serialize;

use crate::types::Date;

/// Horizontal placement of one timeline bar, in percent of the window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanPosition {
    /// Distance from the window's left edge, `0.0..=100.0`.
    pub offset_pct: f64,
    /// Bar width, `> 0.0`, clamped so `offset + width <= 100.0`.
    pub width_pct: f64,
}

/// Position an inclusive date span inside an inclusive window.
///
/// Returns `None` when there is nothing to draw:
/// - the window is empty (`window_end < window_start`),
/// - the item is inverted (`end < start`),
/// - the item lies entirely outside the window.
///
/// A single-day item occupies one day's width; an item partially outside the
/// window is clamped to the window edges.
pub fn span_position(
    window_start: Date,
    window_end: Date,
    start: Date,
    end: Date,
) -> Option<SpanPosition> {
    if window_end < window_start || end < start {
        return None;
    }
    if end < window_start || start > window_end {
        return None;
    }

    // Inclusive day counts: a window of one day has span 1.
    let window_days = (window_end - window_start).num_days() + 1;

    let clamped_start = start.max(window_start);
    let clamped_end = end.min(window_end);

    let offset_days = (clamped_start - window_start).num_days();
    let width_days = (clamped_end - clamped_start).num_days() + 1;

    let offset_pct = offset_days as f64 / window_days as f64 * 100.0;
    let width_pct = width_days as f64 / window_days as f64 * 100.0;

    Some(SpanPosition {
        offset_pct,
        width_pct,
    })
}
