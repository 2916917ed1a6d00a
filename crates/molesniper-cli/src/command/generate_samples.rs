use std::path::PathBuf;

use chrono::Utc;
use molesniper_dataset::{SampleSynthesizer, ScatterParams};
use molesniper_field::GridSpec;
use molesniper_stats::counts::CellCounts;
use molesniper_targeting::{TargetSelector, TargetingParams};

use crate::{
    model::sample_set::SampleSet,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateSamplesArg {
    /// Number of samples to synthesize
    #[arg(long, default_value_t = 10_000)]
    count: usize,
    /// Seed for a reproducible sample stream
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateSamplesArg) -> anyhow::Result<()> {
    let GenerateSamplesArg {
        count,
        seed,
        output,
    } = arg;

    let seed = util::resolve_seed(*seed);
    let grid = GridSpec::stage5();
    let targeting = TargetingParams::default();
    let scatter = ScatterParams::default();
    let synthesizer =
        SampleSynthesizer::new(TargetSelector::new(grid, targeting), scatter);

    eprintln!("Synthesizing {count} samples...");
    let mut rng = seed.rng();
    let samples = synthesizer.synthesize_batch(&mut rng, *count);

    let mut labels = CellCounts::new(grid.cell_count());
    for sample in &samples {
        labels.record(sample.label);
    }
    eprintln!(
        "  Label coverage: {:.1}% of {} cells",
        labels.coverage() * 100.0,
        grid.cell_count(),
    );
    if let Some((cell, occurrences)) = labels.most_common() {
        let (col, row) = grid.index_to_cell(cell);
        eprintln!("  Most common label: cell ({col}, {row}) x{occurrences}");
    }

    let set = SampleSet {
        generated_at: Utc::now(),
        seed,
        grid,
        targeting,
        scatter,
        samples,
    };
    Output::save_json(&set, output.clone())?;
    Ok(())
}
