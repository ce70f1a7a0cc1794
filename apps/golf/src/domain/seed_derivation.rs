//! RNG seed derivation for deterministic shuffles.
//!
//! Every shuffle a game performs (the opening deal and each discard-pile
//! recycle) draws from its own ChaCha20 stream keyed by the game's base seed,
//! the game id and the snapshot version the action is applied to. Replaying
//! the same action against the same snapshot produces the same cards.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const SHUFFLE_CONTEXT: &str = "golf 2026-10-16 shuffle seed";

/// Derive a 32-byte seed for a shuffle at `version` of game `game_id`.
pub fn derive_shuffle_seed(game_seed: u64, game_id: i64, version: u64) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(SHUFFLE_CONTEXT);
    hasher.update(&game_seed.to_le_bytes());
    hasher.update(&game_id.to_le_bytes());
    hasher.update(&version.to_le_bytes());
    *hasher.finalize().as_bytes()
}

pub fn shuffle_rng(game_seed: u64, game_id: i64, version: u64) -> ChaCha20Rng {
    ChaCha20Rng::from_seed(derive_shuffle_seed(game_seed, game_id, version))
}
