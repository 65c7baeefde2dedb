//! Injectable randomness for identifiers and staff assignment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of random choices.
pub trait Entropy: Send {
    /// A lowercase base-36 token of `len` characters.
    fn token(&mut self, len: usize) -> String;

    /// An index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// `rand`-backed entropy.
pub struct RngEntropy {
    rng: StdRng,
}

impl RngEntropy {
    /// Seed from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RngEntropy {
    fn default() -> Self {
        Self::from_os()
    }
}

impl Entropy for RngEntropy {
    fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36[self.rng.random_range(0..BASE36.len())] as char)
            .collect()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Deterministic entropy: counter-based tokens, always picks the first choice.
#[derive(Debug, Default)]
pub struct SequentialEntropy {
    counter: u64,
}

impl SequentialEntropy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entropy for SequentialEntropy {
    fn token(&mut self, len: usize) -> String {
        self.counter += 1;
        format!("{:0>width$}", self.counter, width = len)
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}
