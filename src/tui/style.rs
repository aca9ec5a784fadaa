//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::components::StorageStatus;

/// Supply series color.
pub const SUPPLY_COLOR: Color = Color::Yellow;
/// Storage series color.
pub const STORAGE_COLOR: Color = Color::Cyan;
/// Load series color.
pub const LOAD_COLOR: Color = Color::Magenta;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Error banner color.
pub const ERROR_FG: Color = Color::Red;

/// Series color of a component.
pub fn component_color(component: &str) -> Color {
    match component {
        "supply" => SUPPLY_COLOR,
        "storage" => STORAGE_COLOR,
        _ => LOAD_COLOR,
    }
}

/// Gauge color for a storage status.
pub fn status_color(status: Option<StorageStatus>) -> Color {
    match status {
        Some(StorageStatus::Full) => Color::Green,
        Some(StorageStatus::Discharging) => Color::Yellow,
        Some(StorageStatus::Charging) => Color::Blue,
        None => FOOTER_FG,
    }
}

/// Computes Y-axis bounds over every series with 10% padding.
pub fn auto_bounds_y(series: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let all = series.iter().flatten().map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(1e-6);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
