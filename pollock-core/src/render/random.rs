use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform randomness for the renderer.
///
/// Every random quantity a mark needs is drawn through [`RandomSource::upto`], so a
/// fixed-seed source reproduces a render exactly.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[0, max)`.
    fn upto(&mut self, max: f64) -> f64 {
        self.next_unit() * max
    }
}

/// Adapter turning any [`rand::Rng`] into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Reproducible source for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Entropy-seeded source; renders differ run to run.
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/random.rs"]
mod tests;
