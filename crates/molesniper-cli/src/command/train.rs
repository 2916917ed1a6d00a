use std::{fs, path::PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use molesniper_dataset::{Sample, SampleSynthesizer, ScatterParams};
use molesniper_field::GridSpec;
use molesniper_stats::counts::CellCounts;
use molesniper_targeting::{TargetSelector, TargetingParams};
use molesniper_training::{AdamParams, Perceptron, Trainer, TrainingParams};

use crate::{
    model::trained_model::TrainedModel,
    util::{self, Output},
};

const MODEL_NAME: &str = "mole-sniper";
const PROGRESS_EVERY: usize = 10;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of training samples to synthesize
    #[arg(long, default_value_t = 50_000)]
    samples: usize,
    /// Number of training epochs
    #[arg(long, default_value_t = 50)]
    epochs: usize,
    /// Minibatch size
    #[arg(long, default_value_t = 256)]
    batch_size: usize,
    /// Adam learning rate
    #[arg(long, default_value_t = 0.001)]
    learning_rate: f32,
    /// Hidden layer width
    #[arg(long, default_value_t = 128)]
    hidden: usize,
    /// Seed for reproducible synthesis and training
    #[arg(long)]
    seed: Option<u64>,
    /// Model JSON output path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also export the fitted model as ONNX to this path
    #[arg(long)]
    onnx: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let seed = util::resolve_seed(arg.seed);
    let grid = GridSpec::stage5();
    let targeting = TargetingParams::default();
    let synthesizer = SampleSynthesizer::new(
        TargetSelector::new(grid, targeting),
        ScatterParams::default(),
    );

    let mut rng = seed.rng();
    eprintln!("Synthesizing {} samples...", arg.samples);
    let samples = synthesizer.synthesize_batch(&mut rng, arg.samples);

    let mut labels = CellCounts::new(grid.cell_count());
    for sample in &samples {
        labels.record(sample.label);
    }
    eprintln!(
        "  Label coverage: {:.1}% of {} cells",
        labels.coverage() * 100.0,
        grid.cell_count(),
    );

    let mut perceptron =
        Perceptron::random(&mut rng, Sample::feature_len(&grid), arg.hidden, grid.cell_count());
    let params = TrainingParams {
        epochs: arg.epochs,
        batch_size: arg.batch_size,
        adam: AdamParams {
            learning_rate: arg.learning_rate,
            ..AdamParams::default()
        },
    };

    eprintln!("Training...");
    let mut trainer = Trainer::new(&mut perceptron, &samples, &params)?;
    let mut final_report = None;
    for epoch in 0..arg.epochs {
        let report = trainer.epoch(&mut rng);
        if epoch == 0 || (epoch + 1) % PROGRESS_EVERY == 0 {
            eprintln!(
                "Epoch {}/{} | Loss: {:.4} | Acc: {:.2}%",
                epoch + 1,
                arg.epochs,
                report.mean_loss,
                report.accuracy * 100.0,
            );
        }
        final_report = Some(report);
    }
    let final_report = final_report.context("training ran zero epochs")?;

    let model = TrainedModel {
        name: MODEL_NAME.to_string(),
        trained_at: Utc::now(),
        grid,
        targeting,
        epochs: arg.epochs,
        final_loss: final_report.mean_loss,
        final_accuracy: final_report.accuracy,
        perceptron,
    };

    if let Some(onnx_path) = &arg.onnx {
        let bytes = molesniper_onnx::to_onnx_bytes(&model.perceptron);
        fs::write(onnx_path, &bytes)
            .with_context(|| format!("Failed to write ONNX model: {}", onnx_path.display()))?;
        #[expect(clippy::cast_precision_loss)]
        let size_kb = bytes.len() as f32 / 1024.0;
        eprintln!("ONNX model written to {} ({size_kb:.1} KB)", onnx_path.display());
    }

    Output::save_json(&model, arg.output.clone())?;
    Ok(())
}
