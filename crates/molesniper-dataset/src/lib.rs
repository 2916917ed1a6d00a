//! Synthetic training data for the leaf-scatter target model.
//!
//! Each sample is one frozen instant of play invented from random draws: a
//! player pose somewhere on the stage, a plausible scatter of leaves already
//! on the ground, and the heuristic's answer for where to throw next. The
//! heuristic ([`molesniper_targeting`]) is the labeling oracle; the trained
//! model is a lossy compression of it, so label quality here bounds model
//! quality.
//!
//! Samples are independent: nothing persists between draws, and a batch is
//! just the same draw repeated. Determinism comes from the injected
//! generator — seed it (see `molesniper_field::ScatterSeed`) and the whole
//! stream replays.

pub use self::{sample::*, synthesizer::*};

pub(crate) mod sample;
pub(crate) mod synthesizer;
