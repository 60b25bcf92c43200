use super::recall::Recall;
use super::response::Recommendation;
use super::response::Spot;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::observation::Observation;
use crate::error::Error;
use crate::evaluation::strength::Strength;
use crate::gameplay::edge::Edge;
use crate::gameplay::edge::Size;
use crate::mccfr::bucket::Bucket;
use crate::mccfr::config::Variant;
use crate::mccfr::encoder::Encoder;
use crate::mccfr::profile::Profile;
use crate::Chips;
use crate::Equity;
use crate::Probability;
use crate::B_BLIND;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

/// the runtime query service over a trained artifact.
///
/// key derivation is shared with training through the Encoder, so a
/// hit returns the learned average strategy. misses, missing tables
/// and unusable artifacts all degrade to the equity heuristic rather
/// than failing the query.
pub struct Api {
    profile: Option<Profile>,
    encoder: Encoder,
}

impl Api {
    pub fn new(profile: Option<Profile>, encoder: Encoder) -> Self {
        Self { profile, encoder }
    }

    /// best-effort load: a bad artifact or missing tables leave a
    /// heuristic-only service rather than an error
    pub fn load(artifact: &Path, centroids: Option<&Path>) -> Self {
        let encoder = match centroids {
            Some(dir) => Encoder::relaxed(dir),
            None => Encoder::empty(),
        };
        let profile = match Profile::load(artifact) {
            Ok(profile) => {
                if profile.variant() == Variant::Postflop
                    && profile.checksum() != encoder.checksum()
                {
                    log::warn!("abstraction checksum drift, falling back to heuristic");
                    None
                } else {
                    Some(profile)
                }
            }
            Err(e) => {
                log::warn!("no usable artifact: {}", e);
                None
            }
        };
        Self { profile, encoder }
    }

    /// monte carlo win probability of a hole pair on a board,
    /// deterministic for fixed cards
    pub fn equity(&self, hole: Hole, board: Hand) -> Equity {
        Observation::from((Hand::from(hole), board)).equity(crate::EQUITY_SAMPLE_COUNT)
    }

    /// showdown order of two hole pairs over a shared board
    pub fn compare(&self, board: Hand, a: Hole, b: Hole) -> Ordering {
        let a = Strength::from(Hand::add(Hand::from(a), board));
        let b = Strength::from(Hand::add(Hand::from(b), board));
        a.cmp(&b)
    }

    /// the main entry point: an action distribution and point action
    /// for a live state. parse and state errors surface; strategy
    /// misses fall back to the equity heuristic.
    pub fn recommend(&self, spot: &Spot) -> anyhow::Result<Recommendation> {
        let hole = spot.hole.parse::<Hole>()?;
        let board = spot.board.parse::<Hand>()?;
        if u64::from(Hand::from(hole)) & u64::from(board) != 0 {
            Err(Error::Parse(format!("hole {} overlaps board {}", hole, board)))?;
        }
        let equity = self.equity(hole, board);
        match self.strategy(spot, hole, board)? {
            Some(strategy) => Ok(self.advise(spot, equity, strategy)),
            None => Ok(self.heuristic(spot, equity)),
        }
    }

    /// derive the training key for this spot and look it up.
    /// Ok(None) means "fall back": no artifact, no centroid table,
    /// or a key the trainer never visited.
    fn strategy(
        &self,
        spot: &Spot,
        hole: Hole,
        board: Hand,
    ) -> anyhow::Result<Option<Vec<(Edge, Probability)>>> {
        let path = Recall::path(&spot.history)?;
        let observation = Observation::from((Hand::from(hole), board));
        let abstraction = match self.encoder.abstraction(&observation) {
            Ok(abstraction) => abstraction,
            Err(Error::Abstraction(street)) => {
                log::warn!("no {} abstraction, falling back", street);
                return Ok(None);
            }
            Err(e) => Err(e)?,
        };
        let bucket = Bucket::from((abstraction, path));
        Ok(self
            .profile
            .as_ref()
            .and_then(|profile| profile.average(&bucket)))
    }

    /// turn a learned distribution into a concrete recommendation
    fn advise(
        &self,
        spot: &Spot,
        equity: Equity,
        strategy: Vec<(Edge, Probability)>,
    ) -> Recommendation {
        let (action, _) = strategy
            .iter()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).expect("finite probability"))
            .expect("non-empty strategy");
        Recommendation {
            action: action.to_string(),
            amount: self.amount(spot, action),
            equity,
            distribution: strategy
                .iter()
                .map(|(edge, p)| (edge.to_string(), *p))
                .collect(),
        }
    }

    /// pot-odds fallback when no strategy is available: bet the pot
    /// with a strong hand, call getting the right price, fold else
    fn heuristic(&self, spot: &Spot, equity: Equity) -> Recommendation {
        let pot = spot.pot as Equity;
        let call = spot.to_call as Equity;
        let (action, amount) = if equity > 0.7 && spot.hero_stack > spot.to_call {
            let edge = match spot.to_call + spot.pot.max(B_BLIND) < spot.hero_stack {
                true => Edge::Raise(Size::Mid),
                false => Edge::Shove,
            };
            (edge, self.amount(spot, &edge))
        } else if equity * (pot + call) >= call {
            match spot.to_call {
                0 => (Edge::Check, None),
                _ => (Edge::Call, Some(spot.to_call)),
            }
        } else {
            (Edge::Fold, None)
        };
        Recommendation {
            action: action.to_string(),
            amount,
            equity,
            distribution: BTreeMap::from([(action.to_string(), 1.0)]),
        }
    }

    /// chips for an abstract edge in this spot, clamped to stack
    fn amount(&self, spot: &Spot, edge: &Edge) -> Option<Chips> {
        match edge {
            Edge::Fold | Edge::Check => None,
            Edge::Call => Some(spot.to_call),
            Edge::Shove => Some(spot.hero_stack),
            Edge::Raise(size) => {
                let fraction = match size {
                    Size::Min => (spot.pot + 2) / 3,
                    Size::Mid => spot.pot,
                };
                Some((spot.to_call + fraction.max(B_BLIND)).min(spot.hero_stack))
            }
        }
    }
}
