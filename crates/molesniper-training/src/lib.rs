//! Trainable approximator for the target-selection heuristic.
//!
//! The heuristic in `molesniper-targeting` is the specification of good
//! targeting; re-running its full grid sweep every frame at runtime is
//! undesirable, so this crate fits a small function approximator to it
//! instead. The approximator is a two-layer perceptron mapping a feature
//! vector (flattened density map + normalized pose) to one unnormalized
//! score per grid cell; the highest-scoring cell is the predicted target.
//!
//! # Training
//!
//! Training is standard multi-class classification against the heuristic's
//! labels:
//!
//! 1. Synthesize labeled samples (`molesniper-dataset`)
//! 2. Shuffle into minibatches each epoch
//! 3. Minimize softmax cross-entropy with the Adam optimizer
//! 4. Report per-epoch mean loss and label accuracy
//!
//! The trained weights are a lossy compression of the heuristic: accuracy
//! against the labels measures compression quality, nothing more. There is
//! no guarantee the model reproduces the heuristic exactly, and none is
//! needed — the runtime can always fall back to the heuristic itself.
//!
//! # Determinism
//!
//! Weight initialization and shuffling draw from a caller-supplied
//! generator; a seeded run reproduces its weights exactly.
//!
//! # Example
//!
//! ```rust,ignore
//! use molesniper_training::{Perceptron, TrainingParams, train};
//!
//! let mut rng = seed.rng();
//! let samples = synthesizer.synthesize_batch(&mut rng, 50_000);
//! let mut model = Perceptron::random(&mut rng, 324, 128, 320);
//! let reports = train(&mut model, &samples, &TrainingParams::default(), &mut rng)?;
//! ```

pub use self::{adam::*, loss::*, perceptron::*, trainer::*};

pub(crate) mod adam;
pub(crate) mod loss;
pub(crate) mod perceptron;
pub(crate) mod trainer;
