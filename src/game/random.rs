//! Dice for spawn and animation decisions.

use rand::Rng;
use std::collections::VecDeque;

/// Source of uniform integers. The core only ever asks "give me a number
/// in `[0, upper)`", which keeps spawn decisions scriptable in tests.
pub trait RandomSource {
    /// Uniform integer in `[0, upper)`. Returns 0 when `upper` is 0.
    fn below(&mut self, upper: u32) -> u32;

    /// True with probability `1 / odds`.
    fn one_in(&mut self, odds: u32) -> bool {
        self.below(odds) == 0
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.0.gen_range(0..upper)
    }
}

/// Replays a fixed list of rolls, reduced modulo the requested bound.
/// Falls back to `fallback` once the script runs dry.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRandom {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Source that always rolls `value`.
    pub fn constant(value: u32) -> Self {
        Self {
            rolls: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        let roll = self.rolls.pop_front().unwrap_or(self.fallback);
        roll % upper
    }
}
