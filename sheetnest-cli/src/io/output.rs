use serde::{Deserialize, Serialize};

use sheetnest::config::NestConfig;
use sheetnest::io::ext_repr::{ExtNestingRequest, ExtPackingResult, ExtProductionResult};

/// Wall-clock breakdown of one CLI run.
#[derive(Serialize, Deserialize, Clone, Debug, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub packing_ms: u64,
    pub total_ms: u64,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SingleOutput {
    pub request: ExtNestingRequest,
    pub solution: ExtPackingResult,
    pub config: NestConfig,
    pub timing: Timing,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOutput {
    pub request: ExtNestingRequest,
    pub solution: ExtProductionResult,
    pub config: NestConfig,
    pub timing: Timing,
}
