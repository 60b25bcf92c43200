use crate::gameplay::edge::Edge;
use crate::Probability;
use crate::Utility;

/// the per-key record of the strategy store.
///
/// the edge list is fixed at first visit; regrets may go negative
/// but are floored, and strategy weights only ever grow. the
/// normalized weights are the published average strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSet {
    edges: Vec<Edge>,
    regrets: Vec<Utility>,
    weights: Vec<Utility>,
}

impl InfoSet {
    pub fn new(edges: Vec<Edge>) -> Self {
        let n = edges.len();
        assert!(n > 0, "decision with no actions");
        Self {
            edges,
            regrets: vec![0.; n],
            weights: vec![0.; n],
        }
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn regrets(&self) -> &[Utility] {
        &self.regrets
    }
    pub fn weights(&self) -> &[Utility] {
        &self.weights
    }

    /// regret matching: positive regrets normalized, else uniform
    pub fn policy(&self) -> Vec<Probability> {
        Self::matched(&self.regrets)
    }

    /// the average strategy: normalized weights, uniform before
    /// any opponent pass has deposited mass
    pub fn average(&self) -> Vec<Probability> {
        let sum = self.weights.iter().sum::<Utility>();
        if sum > 0. {
            self.weights.iter().map(|w| w / sum).collect()
        } else {
            vec![1. / self.edges.len() as Probability; self.edges.len()]
        }
    }

    pub fn add_regret(&mut self, deltas: &[Utility]) {
        assert!(deltas.len() == self.regrets.len());
        for (regret, delta) in self.regrets.iter_mut().zip(deltas) {
            *regret = (*regret + delta).max(crate::REGRET_MIN);
        }
    }
    pub fn add_policy(&mut self, policy: &[Probability]) {
        assert!(policy.len() == self.weights.len());
        for (weight, p) in self.weights.iter_mut().zip(policy) {
            *weight += p;
        }
    }

    fn matched(regrets: &[Utility]) -> Vec<Probability> {
        let positive = regrets.iter().map(|r| r.max(0.)).collect::<Vec<_>>();
        let sum = positive.iter().sum::<Utility>();
        if sum > 0. {
            positive.into_iter().map(|r| r / sum).collect()
        } else {
            vec![1. / regrets.len() as Probability; regrets.len()]
        }
    }
}

/// reassembly from artifact records
impl From<(Vec<Edge>, Vec<Utility>, Vec<Utility>)> for InfoSet {
    fn from((edges, regrets, weights): (Vec<Edge>, Vec<Utility>, Vec<Utility>)) -> Self {
        assert!(edges.len() == regrets.len());
        assert!(edges.len() == weights.len());
        Self {
            edges,
            regrets,
            weights,
        }
    }
}

impl crate::Arbitrary for InfoSet {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let n = rng.random_range(2..5);
        let mut infoset = Self::new((0..n as u8).map(|i| Edge::try_from(i).unwrap()).collect());
        infoset.add_regret(&(0..n).map(|_| rng.random_range(-10.0..10.0)).collect::<Vec<_>>());
        infoset.add_policy(&(0..n).map(|_| rng.random::<f64>()).collect::<Vec<_>>());
        infoset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn matching_normalizes() {
        for _ in 0..100 {
            let infoset = InfoSet::random();
            let policy = infoset.policy();
            assert!((policy.iter().sum::<Probability>() - 1.).abs() < 1e-9);
            assert!(policy.iter().all(|p| *p >= 0.));
        }
    }

    #[test]
    fn matching_zeroes_negative_regret() {
        let mut infoset = InfoSet::new(vec![Edge::Fold, Edge::Call, Edge::Shove]);
        infoset.add_regret(&[-5., 3., 1.]);
        let policy = infoset.policy();
        assert_eq!(policy[0], 0.);
        assert!((policy[1] - 0.75).abs() < 1e-9);
        assert!((policy[2] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn matching_uniform_when_hopeless() {
        let mut infoset = InfoSet::new(vec![Edge::Fold, Edge::Call]);
        infoset.add_regret(&[-5., -3.]);
        assert_eq!(infoset.policy(), vec![0.5, 0.5]);
    }

    #[test]
    fn weights_never_negative() {
        for _ in 0..100 {
            let infoset = InfoSet::random();
            assert!(infoset.weights().iter().all(|w| *w >= 0.));
        }
    }

    #[test]
    fn average_uniform_before_visits() {
        let infoset = InfoSet::new(vec![Edge::Check, Edge::Shove]);
        assert_eq!(infoset.average(), vec![0.5, 0.5]);
    }
}
