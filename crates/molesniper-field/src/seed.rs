use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic sample synthesis.
///
/// A 128-bit seed that initializes the random number generator behind pose
/// sampling, leaf-cluster placement, and fallback target selection. The same
/// seed reproduces the same sample stream, enabling regression tests and
/// replayable dataset builds.
///
/// Serialized as a 32-character hex string so it can ride along in dataset
/// and model metadata files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterSeed([u8; 16]);

impl ScatterSeed {
    /// Widens a `u64` (e.g. a CLI `--seed` flag) into a full seed by
    /// repeating it across both halves.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        let half = seed.to_be_bytes();
        let mut bytes = [0; 16];
        bytes[..8].copy_from_slice(&half);
        bytes[8..].copy_from_slice(&half);
        Self(bytes)
    }

    /// Creates the generator this seed describes.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl Serialize for ScatterSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for ScatterSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<ScatterSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScatterSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ScatterSeed(seed)
    }
}
