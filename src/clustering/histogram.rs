use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::observation::Observation;
use crate::evaluation::strength::Strength;
use crate::Equity;
use crate::HISTOGRAM_BIN_COUNT;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cmp::Ordering;

const BINS: usize = HISTOGRAM_BIN_COUNT;

/// a distribution over terminal equities.
///
/// this is the feature vector we cluster on: how often a holding
/// ends up weak, middling, or strong across sampled futures. the
/// Euclidean metric over bin densities is the clustering distance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Histogram {
    counts: [f32; BINS],
    norm: f32,
}

impl Histogram {
    pub fn witness(mut self, equity: Equity) -> Self {
        let bin = ((equity * BINS as Equity) as usize).min(BINS - 1);
        self.counts[bin] += 1.;
        self.norm += 1.;
        self
    }
    pub fn density(&self, bin: usize) -> f32 {
        if self.norm == 0. {
            0.
        } else {
            self.counts[bin] / self.norm
        }
    }
    pub fn densities(&self) -> [f32; BINS] {
        std::array::from_fn(|i| self.density(i))
    }
    pub fn distance(&self, other: &Self) -> f32 {
        (0..BINS)
            .map(|i| self.density(i) - other.density(i))
            .map(|dx| dx * dx)
            .sum::<f32>()
            .sqrt()
    }
    /// the mean of a set of histograms, used as a cluster centroid
    pub fn mean<'a>(points: impl Iterator<Item = &'a Histogram>) -> Self {
        let mut counts = [0f32; BINS];
        let mut n = 0f32;
        for point in points {
            for (bin, count) in counts.iter_mut().enumerate() {
                *count += point.density(bin);
            }
            n += 1.;
        }
        assert!(n > 0., "mean of empty cluster");
        Self {
            counts: counts.map(|c| c / n),
            norm: 1.,
        }
    }
}

/// recover a histogram from persisted bin densities
impl From<[f32; BINS]> for Histogram {
    fn from(counts: [f32; BINS]) -> Self {
        Self { counts, norm: 1. }
    }
}

/// the monte carlo rollout behind the feature vector.
///
/// each future runs the board out and scores the holding against a
/// handful of sampled opponents; the mean of those showdowns is one
/// equity draw. seeded from the canonical observation so the same
/// cards always produce the same histogram.
impl From<Observation> for Histogram {
    fn from(observation: Observation) -> Self {
        let ref mut rng = SmallRng::seed_from_u64(observation.seed());
        let observation = observation.canonical();
        let secret = observation.secret();
        let public = observation.public();
        let runout = 5 - public.size();
        (0..crate::ROLLOUT_FUTURE_COUNT)
            .map(|_| {
                let mut deck = Deck::from(Hand::add(secret, public));
                deck.shuffle(rng);
                let board = Hand::add(public, deck.deal(runout));
                let hero = Strength::from(Hand::add(secret, board));
                (0..crate::ROLLOUT_MATCHUP_COUNT)
                    .map(|_| {
                        let mut rest = deck.clone();
                        rest.shuffle(rng);
                        let villain = Strength::from(Hand::add(rest.deal(2), board));
                        match hero.cmp(&villain) {
                            Ordering::Greater => 1.,
                            Ordering::Equal => 0.5,
                            Ordering::Less => 0.,
                        }
                    })
                    .sum::<Equity>()
                    / crate::ROLLOUT_MATCHUP_COUNT as Equity
            })
            .fold(Self::default(), Self::witness)
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        (0..BINS).try_for_each(|i| write!(f, "{:>5.2}", self.density(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::street::Street;

    #[test]
    fn densities_normalize() {
        let h = Histogram::default().witness(0.1).witness(0.9).witness(0.9);
        let sum = (0..BINS).map(|i| h.density(i)).sum::<f32>();
        assert!((sum - 1.).abs() < 1e-6);
        assert!(h.density(BINS - 1) > h.density(0));
    }

    #[test]
    fn extreme_equity_stays_in_range() {
        let h = Histogram::default().witness(1.0).witness(0.0);
        assert!(h.density(BINS - 1) > 0.);
        assert!(h.density(0) > 0.);
    }

    #[test]
    fn rollout_is_reproducible() {
        let observation = Observation::from(Street::Flop);
        assert_eq!(Histogram::from(observation), Histogram::from(observation));
    }

    #[test]
    fn distance_is_metric_enough() {
        let a = Histogram::default().witness(0.1).witness(0.2);
        let b = Histogram::default().witness(0.8).witness(0.9);
        assert_eq!(a.distance(&a), 0.);
        assert!(a.distance(&b) > 0.);
        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-6);
    }
}
