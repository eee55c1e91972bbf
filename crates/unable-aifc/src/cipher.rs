//! Keystream transform used by able-compressed sound data
//!
//! Keystream block `i` is `SHA-256(key || i)` with `i` as a big-endian `u64`.
//! Each payload byte is XORed with the matching keystream byte, so applying
//! the transform twice with the same key restores the input and the payload
//! length never changes.
//!
//! This is not the vendor's able algorithm, which is not public. It is a
//! stand-in chosen for this crate (recorded in `DESIGN.md`) and everything that
//! depends on it goes through [`apply_keystream`], so the real transform can
//! replace it here.

use sha2::{Digest, Sha256};

/// Bytes produced per keystream block
pub const BLOCK_LEN: usize = 32;

/// XOR `data` in place with the keystream derived from `key`
pub fn apply_keystream(key: &[u8], data: &mut [u8]) {
    let mut prefix = Sha256::new();
    prefix.update(key);

    for (counter, block) in data.chunks_mut(BLOCK_LEN).enumerate() {
        let keystream = prefix
            .clone()
            .chain_update((counter as u64).to_be_bytes())
            .finalize();

        for (byte, k) in block.iter_mut().zip(keystream.iter()) {
            *byte ^= k;
        }
    }
}
