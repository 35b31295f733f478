//! Pivot selection policies for the partition-exchange sort

use crate::error::SortError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

/// How the pivot of each partition step is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Last element of the range (classic Lomuto)
    #[default]
    Last,
    /// Median of the first, middle and last elements
    MedianOfThree,
    /// Uniformly random element of the range
    Random,
}

/// Stateful pivot chooser; owns the generator for `PivotStrategy::Random`
#[derive(Debug, Clone)]
pub struct PivotSelector {
    strategy: PivotStrategy,
    rng: Option<StdRng>,
}

impl PivotSelector {
    /// Create a selector. `seed` only matters for `PivotStrategy::Random`;
    /// without one the generator is seeded from OS entropy.
    pub fn new(strategy: PivotStrategy, seed: Option<u64>) -> Self {
        let rng = match strategy {
            PivotStrategy::Random => Some(match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            }),
            _ => None,
        };
        Self { strategy, rng }
    }

    pub fn strategy(&self) -> PivotStrategy {
        self.strategy
    }

    /// Index of the pivot within `v`. `v` must hold at least two elements.
    pub fn choose<T: PartialOrd>(&mut self, v: &[T]) -> usize {
        let last = v.len() - 1;
        match (self.strategy, self.rng.as_mut()) {
            (PivotStrategy::Random, Some(rng)) => rng.gen_range(0..=last),
            (PivotStrategy::MedianOfThree, _) if v.len() >= 3 => {
                median_of_three(v, 0, v.len() / 2, last)
            }
            _ => last,
        }
    }
}

impl Default for PivotSelector {
    fn default() -> Self {
        Self::new(PivotStrategy::Last, None)
    }
}

/// Find median of three elements for pivot selection
fn median_of_three<T: PartialOrd>(v: &[T], a: usize, b: usize, c: usize) -> usize {
    if v[a] <= v[b] {
        if v[b] <= v[c] {
            b
        } else if v[a] <= v[c] {
            c
        } else {
            a
        }
    } else if v[b] > v[c] {
        b
    } else if v[a] <= v[c] {
        a
    } else {
        c
    }
}

impl FromStr for PivotStrategy {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last" | "lomuto" => Ok(PivotStrategy::Last),
            "median-of-three" | "median3" | "median" => Ok(PivotStrategy::MedianOfThree),
            "random" => Ok(PivotStrategy::Random),
            _ => Err(SortError::parse_error(&format!(
                "unknown pivot strategy: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for PivotStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PivotStrategy::Last => "last",
            PivotStrategy::MedianOfThree => "median-of-three",
            PivotStrategy::Random => "random",
        };
        write!(f, "{name}")
    }
}
