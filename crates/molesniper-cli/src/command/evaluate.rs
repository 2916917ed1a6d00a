use std::path::PathBuf;

use chrono::{DateTime, Utc};
use molesniper_dataset::{SampleSynthesizer, ScatterParams};
use molesniper_stats::counts::CellCounts;
use molesniper_targeting::TargetSelector;
use molesniper_training::accuracy;
use serde::Serialize;

use crate::{
    model::trained_model::TrainedModel,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Trained model JSON to evaluate
    #[arg(long)]
    model: PathBuf,
    /// Number of fresh samples to evaluate on
    #[arg(long, default_value_t = 1_000)]
    count: usize,
    /// Seed for a reproducible evaluation stream
    #[arg(long)]
    seed: Option<u64>,
    /// Report output path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Agreement of a trained model with the heuristic on fresh samples.
#[derive(Debug, Clone, Serialize)]
struct EvaluationReport {
    evaluated_at: DateTime<Utc>,
    model_name: String,
    sample_count: usize,
    /// Fraction of samples where the model's arg-max cell matched the
    /// heuristic label.
    heuristic_agreement: f32,
    /// Fraction of grid cells the model predicted at least once.
    prediction_coverage: f32,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let model = TrainedModel::open(&arg.model)?;
    let synthesizer = SampleSynthesizer::new(
        TargetSelector::new(model.grid, model.targeting),
        ScatterParams::default(),
    );

    eprintln!("Synthesizing {} evaluation samples...", arg.count);
    let mut rng = util::resolve_seed(arg.seed).rng();
    let samples = synthesizer.synthesize_batch(&mut rng, arg.count);

    let mut predictions = CellCounts::new(model.grid.cell_count());
    for sample in &samples {
        predictions.record(model.perceptron.predict(&sample.features));
    }
    let agreement = accuracy(&model.perceptron, &samples);

    eprintln!(
        "  Heuristic agreement: {:.2}% over {} samples",
        agreement * 100.0,
        arg.count,
    );
    eprintln!(
        "  Prediction coverage: {:.1}% of cells",
        predictions.coverage() * 100.0,
    );

    let report = EvaluationReport {
        evaluated_at: Utc::now(),
        model_name: model.name,
        sample_count: arg.count,
        heuristic_agreement: agreement,
        prediction_coverage: predictions.coverage(),
    };
    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}
