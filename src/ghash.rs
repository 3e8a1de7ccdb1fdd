//! The GHASH universal hash from [NIST SP 800-38D section 6.4][1].
//!
//! GHASH is the only consumer of field multiplication in GCM. It is provided here so that
//! multipliers can be checked against published GCM values; building the length block, running
//! the block cipher and handling the tag are left to the mode implementation.
//!
//! [1]: https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38d.pdf

use crate::fields::{
    BLOCK_SIZE,
    convention::GcmElement,
    field2_128::{Multiplier, MultiplierContext},
};

/// Running GHASH state over a multiplier for the hash subkey `H`.
#[derive(Clone, Debug)]
pub struct Ghash<M: Multiplier = MultiplierContext> {
    multiplier: M,
    accumulator: GcmElement,
}

impl Ghash<MultiplierContext> {
    /// Start a hash under the big-endian subkey `H`, using the fastest available backend.
    pub fn with_key(h: &[u8; BLOCK_SIZE]) -> Self {
        Self::new(MultiplierContext::new(h))
    }
}

impl<M: Multiplier> Ghash<M> {
    pub fn new(multiplier: M) -> Self {
        Self {
            multiplier,
            accumulator: GcmElement::ZERO,
        }
    }

    /// Absorb one block: `Y = (Y + X) * H`.
    pub fn update_block(&mut self, block: &[u8; BLOCK_SIZE]) {
        self.accumulator += GcmElement::from_bytes(block);
        self.accumulator = self.multiplier.multiply(&self.accumulator);
    }

    /// Absorb a byte string, zero-padding its final partial block as GCM does for additional data
    /// and ciphertext. An empty string absorbs nothing.
    pub fn update_padded(&mut self, data: &[u8]) {
        let mut chunks = data.chunks_exact(BLOCK_SIZE);
        for chunk in &mut chunks {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.update_block(&block);
        }

        let remainder = chunks.remainder();
        if !remainder.is_empty() {
            let mut block = [0u8; BLOCK_SIZE];
            block[..remainder.len()].copy_from_slice(remainder);
            self.update_block(&block);
        }
    }

    /// The current hash value.
    pub fn finalize(self) -> [u8; BLOCK_SIZE] {
        self.accumulator.to_bytes()
    }
}
