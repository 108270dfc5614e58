//! Event colour palette.
//!
//! Proposal colours are picked by the proposal's position in the current
//! proposal list, so reordering that list recolours its events.

/// Sixteen visually distinct event colours.
pub const EVENT_COLORS: [&str; 16] = [
    "#2196f3", "#009688", "#ff9800", "#9c27b0", "#f44336", "#673ab7", "#e91e63", "#03a9f4",
    "#3f51b5", "#4caf50", "#ffc107", "#8bc34a", "#795548", "#607d8b", "#ff5722", "#cddc39",
];

/// Neutral gray for reserved slots.
pub const RESERVED_BG: &str = "#9e9e9e";

pub fn event_color(index: usize) -> &'static str {
    EVENT_COLORS[index % EVENT_COLORS.len()]
}
