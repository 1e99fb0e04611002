//! Seeded random number generation for the drivers

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Build the per-run RNG, drawing a seed from entropy when none is
/// configured. Returns the seed actually used so callers can report it.
pub fn seeded(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

/// Derive an independent deterministic stream for a numbered consumer.
///
/// Seeding happens once per process run; per-connection grids fork from
/// that seed instead of reseeding.
pub fn fork(seed: u64, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}
