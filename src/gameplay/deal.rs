use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use rand::rngs::SmallRng;

/// one full chance outcome, sampled up front.
///
/// external sampling draws all randomness at the root: both holes
/// and the five-card runout. chance nodes then just reveal the next
/// slice of the runout instead of branching.
#[derive(Debug, Clone, Copy)]
pub struct Deal {
    holes: [Hole; 2],
    runout: [Card; 5],
}

impl Deal {
    pub fn random(rng: &mut SmallRng) -> Self {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        let holes = [
            Hole::from((deck.draw(), deck.draw())),
            Hole::from((deck.draw(), deck.draw())),
        ];
        let runout = std::array::from_fn(|_| deck.draw());
        Self { holes, runout }
    }
    pub fn holes(&self) -> [Hole; 2] {
        self.holes
    }
    /// the cards revealed when advancing off a street
    pub fn reveal(&self, street: Street) -> Hand {
        match street {
            Street::Pref => Hand::from(self.runout[..3].to_vec()),
            Street::Flop => Hand::from(self.runout[3]),
            Street::Turn => Hand::from(self.runout[4]),
            Street::Rive => Hand::empty(),
            Street::Show => unreachable!("no reveal at showdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn deals_disjoint_cards() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let deal = Deal::random(&mut rng);
            let cards = Hand::add(
                Hand::add(
                    Hand::from(deal.holes[0]), //
                    Hand::from(deal.holes[1]),
                ),
                Hand::from(deal.runout.to_vec()),
            );
            assert_eq!(cards.size(), 9);
        }
    }

    #[test]
    fn reveals_runout_in_order() {
        let mut rng = SmallRng::seed_from_u64(7);
        let deal = Deal::random(&mut rng);
        let board = Hand::add(
            Hand::add(
                deal.reveal(Street::Pref), //
                deal.reveal(Street::Flop),
            ),
            deal.reveal(Street::Turn),
        );
        assert_eq!(board.size(), 5);
        assert_eq!(deal.reveal(Street::Rive).size(), 0);
    }
}
