//! Statistical reporting helpers for the molesniper pipeline.
//!
//! This crate provides the small, dependency-free accumulators used when
//! reporting on training runs and synthesized datasets:
//!
//! - [`running::RunningStats`]: streaming min/max/mean/standard deviation,
//!   fed one value at a time (per-batch losses, per-sample scores)
//! - [`counts::CellCounts`]: frequency table over grid cell indices
//!   (label distribution of a dataset, prediction spread of a model)
//!
//! # Examples
//!
//! ```
//! use molesniper_stats::running::RunningStats;
//!
//! let mut stats = RunningStats::new();
//! for loss in [0.9, 0.7, 0.5] {
//!     stats.push(loss);
//! }
//! assert_eq!(stats.count(), 3);
//! assert!((stats.mean() - 0.7).abs() < 1e-6);
//! ```
//!
//! ```
//! use molesniper_stats::counts::CellCounts;
//!
//! let mut counts = CellCounts::new(4);
//! counts.record(1);
//! counts.record(1);
//! counts.record(3);
//! assert_eq!(counts.most_common(), Some((1, 2)));
//! assert!((counts.coverage() - 0.5).abs() < 1e-6);
//! ```

pub mod counts;
pub mod running;
