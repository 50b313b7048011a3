//! External (JSON) representation of nesting requests and responses.
//!
//! Field names follow the camelCase convention of the service this engine
//! plugs into; everything here is a plain data shape with no behavior.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::opt::StrategyKind;

#[derive(Serialize, Deserialize, Clone, Debug, Copy)]
pub struct ExtPoint {
    pub x: f64,
    pub y: f64,
}

/// External representation of a [`Part`](crate::entities::Part).
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtPart {
    pub id: String,
    /// Boundary polygon, at least 3 points.
    pub points: Vec<ExtPoint>,
    pub width: f64,
    pub height: f64,
    /// Precomputed polygon area; verified against the boundary at ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Copies requested in production mode. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<usize>,
}

/// A complete nesting request.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtNestingRequest {
    pub parts: Vec<ExtPart>,
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Cutting margin between parts; defaults to 0.0625 units.
    #[serde(default)]
    pub spacing: Option<f64>,
    /// Named rotation/resolution preset (`cardinal`, `balanced`, `fine`,
    /// `ultra`).
    #[serde(default)]
    pub preset: Option<String>,
    /// Derives a custom preset from a rotation step in degrees.
    #[serde(default)]
    pub rotation_step_degrees: Option<f64>,
    /// Explicit overrides applied on top of the selected preset.
    #[serde(default)]
    pub rotations: Option<Vec<f64>>,
    #[serde(default)]
    pub step_size: Option<f64>,
    #[serde(default)]
    pub cells_per_unit: Option<f64>,
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    /// Number of sheets of a production run; absent means single-sheet mode.
    #[serde(default)]
    pub sheet_count: Option<usize>,
    #[serde(default)]
    pub pack_all_items: bool,
    /// Sort parts largest-first before packing. Defaults to true.
    #[serde(default)]
    pub sort_largest_first: Option<bool>,
    #[serde(default)]
    pub track_metrics: bool,
    #[serde(default)]
    pub prng_seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlacement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtMetrics {
    pub positions_tried: usize,
    pub total_ms: u64,
    pub avg_ms_per_part: f64,
    pub rotations: usize,
    pub cells_per_unit: f64,
    pub step_size: f64,
}

/// Single-sheet response.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtPackingResult {
    pub placements: Vec<ExtPlacement>,
    pub unplaced_part_ids: Vec<String>,
    /// Percentage of sheet area covered.
    pub utilization: f64,
    pub placed_count: usize,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ExtMetrics>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtSheetResult {
    pub sheet_index: usize,
    pub placements: Vec<ExtPlacement>,
    pub utilization: f64,
}

/// Multi-sheet (production mode) response.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExtProductionResult {
    pub sheets: Vec<ExtSheetResult>,
    pub total_utilization: f64,
    /// Copies actually placed per original part id across all sheets.
    pub quantities: HashMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_from_camel_case_json() {
        let json = r#"{
            "parts": [
                {
                    "id": "s1",
                    "points": [
                        {"x": 0.0, "y": 0.0},
                        {"x": 1.0, "y": 0.0},
                        {"x": 1.0, "y": 1.0},
                        {"x": 0.0, "y": 1.0}
                    ],
                    "width": 1.0,
                    "height": 1.0,
                    "quantity": 3
                }
            ],
            "sheetWidth": 12.0,
            "sheetHeight": 12.0,
            "spacing": 0.0625,
            "preset": "cardinal",
            "strategy": "nfp-greedy",
            "sheetCount": 5,
            "packAllItems": true
        }"#;

        let request: ExtNestingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.parts.len(), 1);
        assert_eq!(request.parts[0].quantity, Some(3));
        assert_eq!(request.sheet_width, 12.0);
        assert_eq!(request.strategy, Some(crate::opt::StrategyKind::NfpGreedy));
        assert_eq!(request.sheet_count, Some(5));
        assert!(request.pack_all_items);
        //omitted optional knobs fall back to None
        assert!(request.rotations.is_none());
        assert!(request.step_size.is_none());
    }

    #[test]
    fn response_serializes_with_camel_case_keys() {
        let response = ExtPackingResult {
            placements: vec![ExtPlacement {
                id: "s1".into(),
                x: 1.0,
                y: 2.0,
                rotation: 90.0,
            }],
            unplaced_part_ids: vec!["s2".into()],
            utilization: 42.5,
            placed_count: 1,
            total_count: 2,
            metrics: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"unplacedPartIds\""));
        assert!(json.contains("\"placedCount\""));
        //absent metrics are omitted entirely
        assert!(!json.contains("metrics"));
    }
}
