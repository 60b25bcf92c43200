use super::histogram::Histogram;
use super::kmeans::KMeans;
use super::lookup::Lookup;
use crate::cards::deck::Deck;
use crate::cards::observation::Observation;
use crate::cards::street::Street;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// the offline abstraction trainer.
///
/// samples canonical observations for a street, rolls each one out
/// into an equity histogram, clusters the histograms, and hands back
/// the centroid table. run once per street before CFR training.
pub struct Learner {
    street: Street,
    seed: u64,
}

impl Learner {
    pub fn new(street: Street, seed: u64) -> Self {
        assert!(street != Street::Pref, "preflop abstraction is lossless");
        assert!(street != Street::Show, "no abstraction at showdown");
        Self { street, seed }
    }

    const fn k(street: Street) -> usize {
        match street {
            Street::Flop => crate::KMEANS_FLOP_CLUSTER_COUNT,
            Street::Turn => crate::KMEANS_TURN_CLUSTER_COUNT,
            Street::Rive => crate::KMEANS_RIVE_CLUSTER_COUNT,
            _ => unreachable!(),
        }
    }

    pub fn learn(&self) -> Lookup {
        log::info!("learning {} abstraction", self.street);
        let ref mut rng = SmallRng::seed_from_u64(self.seed);
        let observations = self.observations(rng);
        log::info!("rolling out {} observations", observations.len());
        let histograms = observations
            .into_par_iter()
            .map(Histogram::from)
            .collect::<Vec<Histogram>>();
        log::info!("clustering into {} buckets", Self::k(self.street));
        let kmeans = KMeans::new(Self::k(self.street), crate::KMEANS_TRAINING_ITERATIONS);
        Lookup::new(self.street, kmeans.cluster(&histograms, rng))
    }

    /// a deduplicated sample of canonical observations.
    /// suit relabeling collapses isomorphic deals before we pay
    /// for their rollouts.
    fn observations(&self, rng: &mut SmallRng) -> Vec<Observation> {
        let n = self.street.n_observed();
        (0..crate::KMEANS_SAMPLE_COUNT)
            .map(|_| {
                let mut deck = Deck::new();
                deck.shuffle(rng);
                let secret = deck.deal(2);
                let public = deck.deal(n);
                Observation::from((secret, public)).canonical()
            })
            .collect::<BTreeSet<Observation>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_collapse_isomorphs() {
        let learner = Learner::new(Street::Flop, 0);
        let ref mut rng = SmallRng::seed_from_u64(0);
        let observations = learner.observations(rng);
        assert!(!observations.is_empty());
        assert!(observations.iter().all(|o| o.street() == Street::Flop));
        assert!(observations.iter().all(|o| *o == o.canonical()));
    }

    #[test]
    #[ignore]
    fn learns_river_buckets() {
        let lookup = Learner::new(Street::Rive, 0).learn();
        assert_eq!(lookup.k(), crate::KMEANS_RIVE_CLUSTER_COUNT);
    }
}
