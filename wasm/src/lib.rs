//! WebAssembly module for the Beverage Container Tracking Platform
//!
//! Provides client-side computation for:
//! - Pre-validating drag-and-drop container moves
//! - Deriving the alert list for a board snapshot
//! - Capacity and volume helpers for the board canvas

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::alerts::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"container-tracking wasm initialized".into());
}

/// Validate a proposed container move
///
/// Takes the container, source location, and destination location as JSON
/// and returns the verdict as JSON (`valid`, `errors`, `warnings`, `no_op`).
#[wasm_bindgen]
pub fn validate_container_move(
    container_json: &str,
    source_json: &str,
    dest_json: &str,
) -> Result<String, JsValue> {
    let container: Container = serde_json::from_str(container_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid container JSON: {}", e)))?;
    let source: Location = serde_json::from_str(source_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid source location JSON: {}", e)))?;
    let dest: Location = serde_json::from_str(dest_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid destination location JSON: {}", e)))?;

    let verdict = validate_move(&container, &source, &dest).map_err(JsValue::from_str)?;
    serde_json::to_string(&verdict).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the alert list for a board snapshot
///
/// `today_iso` is a `YYYY-MM-DD` date for overdue-return detection; when
/// omitted, the browser clock is used.
#[wasm_bindgen]
pub fn compute_board_alerts(
    locations_json: &str,
    default_low_stock: u32,
    today_iso: Option<String>,
) -> Result<String, JsValue> {
    let locations: Vec<Location> = serde_json::from_str(locations_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid locations JSON: {}", e)))?;

    let today = match today_iso {
        Some(iso) => NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))?,
        None => browser_today(),
    };

    let thresholds = AlertThresholds {
        default_low_stock,
        ..AlertThresholds::default()
    };
    let alerts = compute_alerts(&locations, &thresholds, today);
    serde_json::to_string(&alerts).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Occupancy of a location as a percentage of its capacity (0-100)
#[wasm_bindgen]
pub fn location_fill_percentage(current: u32, capacity: u32) -> u32 {
    if capacity == 0 {
        return 100;
    }
    (current * 100 / capacity).min(100)
}

/// Aggregate liquid volume of a product group, in liters
#[wasm_bindgen]
pub fn product_group_volume(group_json: &str) -> Result<f64, JsValue> {
    let group: ProductGroup = serde_json::from_str(group_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid product group JSON: {}", e)))?;
    Ok(group.total_volume().to_string().parse().unwrap_or(0.0))
}

/// Whether a container in the given lifecycle status may be loaded onto a
/// truck
#[wasm_bindgen]
pub fn can_load_status(status: &str) -> bool {
    serde_json::from_str::<ContainerStatus>(&format!("\"{}\"", status))
        .map(|s| s.cleared_for_loading())
        .unwrap_or(false)
}

/// Today's date from the browser clock
fn browser_today() -> NaiveDate {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or_default()
}
