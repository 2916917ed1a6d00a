use std::{fs, path::PathBuf};

use anyhow::Context as _;
use molesniper_dataset::Sample;
use molesniper_field::{GridSpec, ScatterSeed};
use molesniper_training::Perceptron;

use crate::model::trained_model::TrainedModel;

const RANDOM_HIDDEN_LEN: usize = 128;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportOnnxArg {
    /// Trained model JSON to export
    #[arg(long, conflicts_with = "random_weights")]
    model: Option<PathBuf>,
    /// Export a randomly initialized model instead (placeholder for
    /// integration testing before training has run)
    #[arg(long)]
    random_weights: bool,
    /// Seed for the random weights
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Output .onnx path
    #[arg(long)]
    output: PathBuf,
}

pub(crate) fn run(arg: &ExportOnnxArg) -> anyhow::Result<()> {
    let perceptron = if let Some(model_path) = &arg.model {
        TrainedModel::open(model_path)?.perceptron
    } else if arg.random_weights {
        let grid = GridSpec::stage5();
        let mut rng = ScatterSeed::from_u64(arg.seed).rng();
        Perceptron::random(
            &mut rng,
            Sample::feature_len(&grid),
            RANDOM_HIDDEN_LEN,
            grid.cell_count(),
        )
    } else {
        anyhow::bail!("either --model or --random-weights is required");
    };

    let bytes = molesniper_onnx::to_onnx_bytes(&perceptron);
    fs::write(&arg.output, &bytes)
        .with_context(|| format!("Failed to write ONNX model: {}", arg.output.display()))?;

    #[expect(clippy::cast_precision_loss)]
    let size_kb = bytes.len() as f32 / 1024.0;
    eprintln!("ONNX model written to {} ({size_kb:.1} KB)", arg.output.display());
    Ok(())
}
