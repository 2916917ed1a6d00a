use std::path::Path;

use chrono::{DateTime, Utc};
use molesniper_field::GridSpec;
use molesniper_targeting::TargetingParams;
use molesniper_training::Perceptron;
use serde::{Deserialize, Serialize};

use crate::util;

/// On-disk model file: the fitted weights plus the configuration they were
/// trained against, so `evaluate` can regenerate comparable samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub grid: GridSpec,
    pub targeting: TargetingParams,
    pub epochs: usize,
    pub final_loss: f32,
    pub final_accuracy: f32,
    pub perceptron: Perceptron,
}

impl TrainedModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("trained model", path)
    }
}
