//! Weighted random provider selection.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::upstream::provider::{Provider, ProviderList};

/// Source of uniform random draws.
pub trait RandomSource: Send + Sync {
    /// Return a value uniformly distributed in `[0, bound)`. `bound` is never 0.
    fn below(&self, bound: u64) -> u64;
}

/// Draws from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, bound: u64) -> u64 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic RNG for reproducible selection.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, bound: u64) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..bound)
    }
}

/// Picks a provider with probability proportional to its weight.
#[derive(Debug, Default)]
pub struct WeightedSelector<R = ThreadRandom> {
    random: R,
}

impl<R: RandomSource> WeightedSelector<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Select one provider from a non-empty list.
    pub fn select<'a>(&self, providers: &'a ProviderList) -> &'a Provider {
        let mut remaining = self.random.below(providers.total_weight());

        for provider in providers {
            let weight = u64::from(provider.weight);
            if remaining < weight {
                return provider;
            }
            remaining -= weight;
        }

        // Only reachable if the random source breaks its contract.
        providers.first()
    }
}
