//! Sequence generation
//!
//! Tokens are drawn independently and uniformly, repeats allowed. The random
//! source is injected so sessions can be replayed from a seed.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::token::{Alphabet, Sequence, Token};

/// Draw `length` tokens uniformly from `alphabet`
pub fn generate<R: Rng + ?Sized>(length: usize, alphabet: Alphabet, rng: &mut R) -> Sequence {
    (0..length)
        .map(|_| Token(rng.random_range(0..alphabet.size())))
        .collect()
}

/// Supplies the sequence for each new round
pub trait SequenceSource {
    fn next_sequence(&mut self, length: usize, alphabet: Alphabet) -> Sequence;
}

/// [`SequenceSource`] backed by a random number generator
#[derive(Debug, Clone)]
pub struct RandomSequences<R: RngCore = Pcg32> {
    rng: R,
}

impl<R: RngCore> RandomSequences<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSequences<Pcg32> {
    /// Deterministic PCG stream for the given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }

    /// Fresh, unpredictable stream
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random::<u64>())
    }
}

impl<R: RngCore> SequenceSource for RandomSequences<R> {
    fn next_sequence(&mut self, length: usize, alphabet: Alphabet) -> Sequence {
        generate(length, alphabet, &mut self.rng)
    }
}
