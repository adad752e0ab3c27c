use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of the placeholder sample appended on every tick.
///
/// Stands in for captured audio until a real backend exists.
pub trait SampleSource: Send {
    /// Next sample, strictly below the source's upper bound.
    fn next_sample(&mut self) -> u32;
}

/// Uniformly distributed pseudo-random samples in `[0, upper_bound)`.
pub struct RandomSamples {
    rng: StdRng,
    upper_bound: u32,
}

impl RandomSamples {
    /// Entropy-seeded source. An `upper_bound` of zero is treated as one.
    pub fn new(upper_bound: u32) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            upper_bound: upper_bound.max(1),
        }
    }

    /// Reproducible source for tests and demos.
    pub fn seeded(upper_bound: u32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            upper_bound: upper_bound.max(1),
        }
    }
}

impl SampleSource for RandomSamples {
    fn next_sample(&mut self) -> u32 {
        self.rng.gen_range(0..self.upper_bound)
    }
}

impl<F> SampleSource for F
where
    F: FnMut() -> u32 + Send,
{
    fn next_sample(&mut self) -> u32 {
        self()
    }
}
