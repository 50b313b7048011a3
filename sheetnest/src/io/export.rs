use crate::entities::{PackMetrics, PackingResult, ProductionResult};
use crate::io::ext_repr::{
    ExtMetrics, ExtPackingResult, ExtPlacement, ExtProductionResult, ExtSheetResult,
};

pub fn export_packing(result: &PackingResult) -> ExtPackingResult {
    ExtPackingResult {
        placements: result.placements.iter().map(export_placement).collect(),
        unplaced_part_ids: result.unplaced_ids.clone(),
        utilization: result.utilization,
        placed_count: result.placements.len(),
        total_count: result.placements.len() + result.unplaced_ids.len(),
        metrics: result.metrics.as_ref().map(export_metrics),
    }
}

pub fn export_production(result: &ProductionResult) -> ExtProductionResult {
    ExtProductionResult {
        sheets: result
            .sheets
            .iter()
            .map(|s| ExtSheetResult {
                sheet_index: s.sheet_index,
                placements: s.placements.iter().map(export_placement).collect(),
                utilization: s.utilization,
            })
            .collect(),
        total_utilization: result.total_utilization,
        quantities: result.quantities.clone(),
    }
}

fn export_placement(p: &crate::entities::Placement) -> ExtPlacement {
    ExtPlacement {
        id: p.id.clone(),
        x: p.x,
        y: p.y,
        rotation: p.rotation,
    }
}

fn export_metrics(m: &PackMetrics) -> ExtMetrics {
    ExtMetrics {
        positions_tried: m.positions_tried,
        total_ms: m.total_time.as_millis() as u64,
        avg_ms_per_part: m.avg_time_per_part.as_secs_f64() * 1000.0,
        rotations: m.n_rotations,
        cells_per_unit: m.cells_per_unit,
        step_size: m.step_size,
    }
}
