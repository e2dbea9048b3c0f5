// File: src/storage/sampling.rs

//! Uniform random sampling without replacement

use rand::seq::SliceRandom;
use rand::Rng;
use std::str::FromStr;

/// How `sample_fresh_pollination` picks rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingStrategy {
    /// `ORDER BY random() LIMIT n` inside SQLite
    #[default]
    Native,

    /// Reservoir sampling over a streaming filtered scan
    Reservoir,
}

impl SamplingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingStrategy::Native => "native",
            SamplingStrategy::Reservoir => "reservoir",
        }
    }
}

impl FromStr for SamplingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(SamplingStrategy::Native),
            "reservoir" => Ok(SamplingStrategy::Reservoir),
            other => Err(format!("unknown sampling strategy: {}", other)),
        }
    }
}

/// Reservoir sample (Algorithm R) over a fallible stream.
///
/// Holds at most `limit` items at any time. Every item of the stream ends up
/// in the result with probability `limit / n`. The result is shuffled so its
/// order carries no information about scan order. The first error aborts.
pub fn try_reservoir_sample<T, E, I, R>(items: I, limit: usize, rng: &mut R) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
    R: Rng + ?Sized,
{
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut reservoir = Vec::with_capacity(limit.min(1024));
    for (seen, item) in items.into_iter().enumerate() {
        let item = item?;
        if seen < limit {
            reservoir.push(item);
        } else {
            let slot = rng.gen_range(0..=seen);
            if slot < limit {
                reservoir[slot] = item;
            }
        }
    }

    reservoir.shuffle(rng);
    Ok(reservoir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn ok_stream(n: u32) -> impl Iterator<Item = Result<u32, ()>> {
        (0..n).map(Ok)
    }

    #[test]
    fn test_limit_zero_is_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = try_reservoir_sample(ok_stream(10), 0, &mut rng).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_short_stream_returns_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = try_reservoir_sample(ok_stream(3), 10, &mut rng).unwrap();
        let set: HashSet<_> = out.iter().copied().collect();
        assert_eq!(out.len(), 3);
        assert_eq!(set, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn test_long_stream_bounded_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = try_reservoir_sample(ok_stream(1000), 25, &mut rng).unwrap();
        let set: HashSet<_> = out.iter().copied().collect();
        assert_eq!(out.len(), 25);
        assert_eq!(set.len(), 25);
        assert!(out.iter().all(|v| *v < 1000));
    }

    #[test]
    fn test_every_item_reachable() {
        // 5 items, pick 1: over many draws every item must show up
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let out = try_reservoir_sample(ok_stream(5), 1, &mut rng).unwrap();
            seen.insert(out[0]);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_error_aborts() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = vec![Ok(1), Err("boom"), Ok(3)];
        assert_eq!(try_reservoir_sample(items, 2, &mut rng), Err("boom"));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("native".parse(), Ok(SamplingStrategy::Native));
        assert_eq!(" Reservoir ".parse(), Ok(SamplingStrategy::Reservoir));
        assert!("random".parse::<SamplingStrategy>().is_err());
        assert_eq!(SamplingStrategy::default(), SamplingStrategy::Native);
        assert_eq!(SamplingStrategy::Reservoir.as_str(), "reservoir");
    }
}
