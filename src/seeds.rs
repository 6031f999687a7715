//! Seed management for cave generation
//!
//! A seed is a plain `u64`. Text seeds are hashed into one so maps can be
//! shared by name, and a random seed is drawn when none is pinned. The
//! resolved seed always travels with the generated map.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaveSeed(pub u64);

impl CaveSeed {
    /// Draw a fresh seed from the thread-local entropy source.
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Derive a seed from free text, e.g. "mossy-grotto".
    pub fn from_text(text: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Pick the seed for one request: a fresh draw when `use_random` is set,
    /// otherwise `pinned`.
    pub fn resolve(pinned: CaveSeed, use_random: bool) -> Self {
        if use_random {
            Self::random()
        } else {
            pinned
        }
    }

    /// Deterministic stream for this seed.
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl From<u64> for CaveSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CaveSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
