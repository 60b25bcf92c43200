use super::card::Card;
use super::deck::Deck;
use super::hand::Hand;
use super::street::Street;
use super::suit::Suit;
use crate::evaluation::strength::Strength;
use crate::Equity;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

/// Observation is what one player can see in between actions:
/// their private cards and the public board. this is the unit
/// that card abstraction maps into a bucket.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Observation {
    secret: Hand,
    public: Hand,
}

impl Observation {
    pub fn secret(&self) -> Hand {
        self.secret
    }
    pub fn public(&self) -> Hand {
        self.public
    }
    pub fn street(&self) -> Street {
        Street::from(self.public.size())
    }
    fn dead(&self) -> Hand {
        Hand::add(self.secret, self.public)
    }

    /// monte carlo showdown estimate.
    ///
    /// each sample runs the board out and deals one opponent hole
    /// from the live deck. ties count half. deterministic under the
    /// caller's RNG.
    pub fn simulate(&self, n: usize, rng: &mut SmallRng) -> Equity {
        assert!(self.secret.size() == 2);
        assert!(self.public.size() <= 5);
        let runout = 5 - self.public.size();
        (0..n)
            .map(|_| {
                let mut deck = Deck::from(self.dead());
                deck.shuffle(rng);
                let villain = deck.deal(2);
                let board = Hand::add(self.public, deck.deal(runout));
                let hero = Strength::from(Hand::add(self.secret, board));
                let them = Strength::from(Hand::add(villain, board));
                match hero.cmp(&them) {
                    Ordering::Greater => 1.,
                    Ordering::Equal => 0.5,
                    Ordering::Less => 0.,
                }
            })
            .sum::<Equity>()
            / n as Equity
    }

    /// equity under a self-seeded RNG, so that repeated queries
    /// of the same observation agree with each other
    pub fn equity(&self, n: usize) -> Equity {
        let ref mut rng = SmallRng::seed_from_u64(self.seed());
        self.canonical().simulate(n, rng)
    }

    /// stable seed for reproducible per-observation sampling
    pub fn seed(&self) -> u64 {
        let ref mut hasher = DefaultHasher::new();
        self.canonical().hash(hasher);
        hasher.finish()
    }

    /// relabel suits into a canonical order so that strategically
    /// equivalent observations collapse onto one representative.
    /// suits sort descending by how much they hold, counts first and
    /// rank content as the tie break, and map onto clubs-first.
    pub fn canonical(&self) -> Self {
        let secret = self.secret.suits();
        let public = self.public.suits();
        let mut suits = Suit::all()
            .into_iter()
            .map(|suit| {
                (
                    secret[suit as usize],
                    public[suit as usize],
                    self.secret.of(&suit),
                    self.public.of(&suit),
                    suit,
                )
            })
            .collect::<Vec<_>>();
        suits.sort_by(|a, b| b.cmp(a));
        let mut permutation = [Suit::C; 4];
        for (new, (_, _, _, _, old)) in suits.into_iter().enumerate() {
            permutation[old as usize] = Suit::from(new as u8);
        }
        Self {
            secret: Self::relabel(self.secret, &permutation),
            public: Self::relabel(self.public, &permutation),
        }
    }
    fn relabel(hand: Hand, permutation: &[Suit; 4]) -> Hand {
        Hand::from(
            hand.into_iter()
                .map(|c| Card::from((c.rank(), permutation[c.suit() as usize])))
                .collect::<Vec<Card>>(),
        )
    }
}

impl From<(Hand, Hand)> for Observation {
    fn from((secret, public): (Hand, Hand)) -> Self {
        assert!(secret.size() == 2);
        assert!(public.size() <= 5);
        assert!(u64::from(secret) & u64::from(public) == 0);
        Self { secret, public }
    }
}

/// generate a random observation for a given street
impl From<Street> for Observation {
    fn from(street: Street) -> Self {
        use rand::Rng;
        let ref mut rng = SmallRng::seed_from_u64(rand::rng().random());
        let mut deck = Deck::new();
        deck.shuffle(rng);
        let secret = deck.deal(2);
        let public = deck.deal(street.n_observed());
        Self::from((secret, public))
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}+{}", self.secret, self.public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(secret: &str, public: &str) -> Observation {
        Observation::from((
            secret.parse::<Hand>().unwrap(),
            public.parse::<Hand>().unwrap(),
        ))
    }

    #[test]
    fn canonical_collapses_suit_isomorphs() {
        let a = observe("AhKh", "").canonical();
        let b = observe("AsKs", "").canonical();
        assert_eq!(a, b);
        let a = observe("AhKd", "2h3d4c").canonical();
        let b = observe("AdKh", "2d3h4s").canonical();
        assert_eq!(a, b);
        let a = observe("AhKd", "2h3d4c").canonical();
        let b = observe("AsKc", "2s3c4d").canonical();
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_is_idempotent() {
        for _ in 0..100 {
            let o = Observation::from(crate::cards::street::Street::Turn);
            assert_eq!(o.canonical(), o.canonical().canonical());
        }
    }

    #[test]
    fn nut_river_equity() {
        // royal flush board-adjacent: hero holds the nuts on this river
        let o = observe("AhKh", "QhJhTh2c3d");
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(o.simulate(200, &mut rng), 1.0);
    }

    #[test]
    fn aces_preflop_equity() {
        let o = observe("AhAd", "");
        let e = o.equity(10_000);
        assert!(e > 0.82 && e < 0.87, "AA equity {}", e);
    }

    #[test]
    fn trash_preflop_equity() {
        let o = observe("2h7d", "");
        let e = o.equity(10_000);
        assert!(e > 0.30 && e < 0.38, "72o equity {}", e);
    }
}
