//! Pseudo-random source owned by the engine.
//!
//! Every generator draws from one `SimRng` passed down explicitly; nothing in
//! the engine touches ambient/global randomness, so tests can inject a seeded
//! source and assert structural properties deterministically.

use std::f64::consts::TAU;

/// Uniform and Gaussian sampler over a [`fastrand::Rng`].
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: fastrand::Rng,
}

impl SimRng {
    /// Entropy-seeded source; every engine construction is a fresh draw.
    pub fn new() -> Self {
        Self {
            inner: fastrand::Rng::new(),
        }
    }

    /// Fixed-seed source for reproducible structure in tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.inner.f64()
    }

    /// Uniform draw in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.uniform()
    }

    /// Uniform integer draw in `[lo, hi]`.
    pub fn range_i64(&mut self, lo: i64, hi: i64) -> i64 {
        self.inner.i64(lo..=hi)
    }

    /// Bernoulli draw with success probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Standard normal draw via the Box-Muller transform.
    ///
    /// The first uniform is redrawn while zero so `ln` stays finite.
    pub fn gaussian(&mut self) -> f64 {
        let mut u1 = self.uniform();
        while u1 == 0.0 {
            u1 = self.uniform();
        }
        let u2 = self.uniform();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new()
    }
}
