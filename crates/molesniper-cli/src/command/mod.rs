use clap::{Parser, Subcommand};

use self::{
    evaluate::EvaluateArg, export_onnx::ExportOnnxArg, generate_samples::GenerateSamplesArg,
    train::TrainArg,
};

mod evaluate;
mod export_onnx;
mod generate_samples;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Synthesize labeled training samples
    GenerateSamples(#[clap(flatten)] GenerateSamplesArg),
    /// Synthesize samples and train the target model
    Train(#[clap(flatten)] TrainArg),
    /// Export a model as an ONNX graph
    ExportOnnx(#[clap(flatten)] ExportOnnxArg),
    /// Measure a model's agreement with the heuristic
    Evaluate(#[clap(flatten)] EvaluateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::GenerateSamples(arg) => generate_samples::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::ExportOnnx(arg) => export_onnx::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}
