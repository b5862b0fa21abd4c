//! Sources of the random jitter used for supersampling.  The engine
//! never reaches for a global generator; every worker is handed its
//! own sampler, which is what lets the tests swap in a fixed value and
//! get bit-identical frames.

use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;

/// A supply of independent uniform values in [0, 1).  Each worker owns
/// one instance, so implementations need no internal synchronization.
pub trait Sampler {
    /// Returns the next value in [0, 1).
    fn next(&mut self) -> f64;
}

/// The production sampler: a uniform distribution over the thread's
/// own generator.
pub struct UniformSampler(Uniform<f64>, ThreadRng);

impl UniformSampler {
    /// Builds a sampler over [0, 1).
    pub fn new() -> UniformSampler {
        UniformSampler(Uniform::new(0.0_f64, 1.0_f64), rand::thread_rng())
    }
}

impl Sampler for UniformSampler {
    fn next(&mut self) -> f64 {
        self.0.sample(&mut self.1)
    }
}

/// A sampler that always returns the same value.  Substituting it for
/// [`UniformSampler`] makes a render fully reproducible, which the
/// test suite and benchmarks rely on.
pub struct FixedSampler(pub f64);

impl Sampler for FixedSampler {
    fn next(&mut self) -> f64 {
        self.0
    }
}
