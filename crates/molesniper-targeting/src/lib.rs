//! Heuristic target selection for the leaf-scatter mechanic.
//!
//! Given a player pose and the current leaf coverage, this crate decides
//! which grid cell is the best place to scatter leaves so the player walks
//! into them. It is the deterministic ground truth that the trained model
//! approximates: the synthesizer labels every training sample with this
//! crate's answer, and the runtime falls back to it when no model is
//! available.
//!
//! # Selection Pipeline
//!
//! For a candidate cell to be considered at all it must pass two geometric
//! gates relative to the player ([`TargetSelector::is_valid_target`]):
//!
//! 1. **Distance band** - Euclidean distance within
//!    \[[`TargetingParams::min_distance`], [`TargetingParams::max_distance`]\].
//!    A throw that lands too close is already behind the player by the time
//!    the leaves settle; too far and the player can change course.
//! 2. **Facing cone** - the direction to the cell must lie within
//!    [`TargetingParams::cone_half_angle_deg`] of the facing direction.
//!
//! Valid cells are ranked by an intercept score
//! ([`TargetSelector::intercept_score`]): alignment with the facing
//! direction times a triangular preference for the mid-band distance, plus
//! a small bonus for cells that already hold leaves. The arg-max cell wins;
//! ties keep the lowest row-major index.
//!
//! # Fallback Tiers
//!
//! Selection never fails. When no cell passes both gates, the selector
//! degrades through two fallback tiers ([`SelectionTier`]): a uniform draw
//! among geometrically valid cells, then a uniform draw over the whole
//! grid. The final tier can pick a cell that violates every constraint;
//! that is accepted as better-than-nothing labeling near degenerate poses.
//!
//! # Determinism
//!
//! Scoring is pure arithmetic. The only randomness is in the fallback
//! draws, and it comes from a caller-supplied generator, so a seeded run
//! reproduces its selections exactly.

pub use self::{params::*, selector::*};

pub(crate) mod params;
pub(crate) mod selector;
