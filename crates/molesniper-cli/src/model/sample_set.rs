use chrono::{DateTime, Utc};
use molesniper_dataset::{Sample, ScatterParams};
use molesniper_field::{GridSpec, ScatterSeed};
use molesniper_targeting::TargetingParams;
use serde::{Deserialize, Serialize};

/// On-disk dataset: the samples plus everything needed to regenerate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSet {
    pub generated_at: DateTime<Utc>,
    pub seed: ScatterSeed,
    pub grid: GridSpec,
    pub targeting: TargetingParams,
    pub scatter: ScatterParams,
    pub samples: Vec<Sample>,
}
