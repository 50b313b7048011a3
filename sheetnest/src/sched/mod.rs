//! Multi-sheet production scheduling: turns a single-sheet strategy into a
//! scheduler that distributes requested copy counts across a fixed number of
//! sheets.

use std::collections::HashMap;

use log::info;

use crate::entities::{Part, ProductionResult, Sheet, SheetResult};
use crate::opt::Strategy;
use crate::util::CancelToken;

const INSTANCE_SEPARATOR: char = '#';

/// Id of one packable copy of a part within a production run.
pub fn instance_id(base: &str, copy: usize) -> String {
    format!("{base}{INSTANCE_SEPARATOR}{copy}")
}

/// Strips the copy suffix off an instance id.
pub fn base_id(instance: &str) -> &str {
    instance
        .rsplit_once(INSTANCE_SEPARATOR)
        .map(|(base, _)| base)
        .unwrap_or(instance)
}

/// Schedules part copies over a fixed number of sheets, invoking the chosen
/// single-sheet strategy once per sheet.
pub struct ProductionScheduler<'a> {
    strategy: &'a dyn Strategy,
    /// With `pack_all_items`, copies that failed to place on a sheet are
    /// retried on every subsequent sheet until quantities are exhausted or
    /// sheets run out. Without it, a part that places zero copies on a sheet
    /// is dropped from the remaining schedule; leftover copies of parts that
    /// did place still carry forward.
    pack_all_items: bool,
}

impl<'a> ProductionScheduler<'a> {
    pub fn new(strategy: &'a dyn Strategy) -> Self {
        Self {
            strategy,
            pack_all_items: false,
        }
    }

    pub fn pack_all_items(mut self, enabled: bool) -> Self {
        self.pack_all_items = enabled;
        self
    }

    pub fn run(
        &self,
        parts: &[Part],
        sheet: &Sheet,
        sheet_count: usize,
        spacing: f64,
        cancel: &CancelToken,
    ) -> ProductionResult {
        let index_of: HashMap<&str, usize> = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.as_str(), i))
            .collect();

        let mut remaining: Vec<usize> = parts.iter().map(|p| p.quantity).collect();
        let mut quantities: HashMap<String, usize> =
            parts.iter().map(|p| (p.id.clone(), 0)).collect();
        let mut sheets: Vec<SheetResult> = vec![];

        for sheet_index in 0..sheet_count {
            if cancel.is_cancelled() {
                info!("[SCHED] cancelled before sheet {sheet_index}, returning partial run");
                break;
            }

            let mut working: Vec<Part> = vec![];
            for (i, part) in parts.iter().enumerate() {
                for copy in 0..remaining[i] {
                    working.push(part.clone_with_id(instance_id(&part.id, copy)));
                }
            }

            let result = self.strategy.pack(&working, sheet, spacing, cancel);

            let mut placed_this_sheet = vec![0usize; parts.len()];
            for placement in &result.placements {
                if let Some(&i) = index_of.get(base_id(&placement.id)) {
                    placed_this_sheet[i] += 1;
                }
            }

            for (i, &placed) in placed_this_sheet.iter().enumerate() {
                remaining[i] = remaining[i].saturating_sub(placed);
                if !self.pack_all_items && placed == 0 {
                    //this part no longer fits anywhere; stop scheduling it
                    remaining[i] = 0;
                }
                *quantities
                    .get_mut(&parts[i].id)
                    .expect("quantity entry missing") += placed;
            }

            info!(
                "[SCHED] sheet {}: placed {} copies, utilization {:.2}%",
                sheet_index,
                result.placements.len(),
                result.utilization
            );

            sheets.push(SheetResult {
                sheet_index,
                placements: result.placements,
                utilization: result.utilization,
            });
        }

        //area-weighted mean across sheets; with uniform sheets this is the
        //plain mean, but the weighting keeps the definition stable
        let total_area: f64 = sheets.len() as f64 * sheet.area();
        let total_utilization = if total_area > 0.0 {
            sheets
                .iter()
                .map(|s| s.utilization * sheet.area())
                .sum::<f64>()
                / total_area
        } else {
            0.0
        };

        info!(
            "[SCHED] production run complete: {} sheets, total utilization {:.2}%",
            sheets.len(),
            total_utilization
        );

        ProductionResult {
            sheets,
            total_utilization,
            quantities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_round_trip() {
        assert_eq!(base_id(&instance_id("star", 3)), "star");
        assert_eq!(base_id("plain"), "plain");
        //a separator in the original id survives the round trip
        assert_eq!(base_id(&instance_id("a#b", 0)), "a#b");
    }
}
