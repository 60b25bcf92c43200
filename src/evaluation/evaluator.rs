use super::kickers::Kickers;
use super::strength::Strength;
use super::value::Value;
use crate::cards::hand::Hand;
use crate::cards::rank::Rank;
use crate::cards::suit::Suit;

/// a lazy evaluator for a hand's strength.
///
/// works over the compact bitstring of any 5..7-card Hand.
/// categories are searched best-first over rank and suit masks,
/// so the first hit is the hand's value and everything after the
/// category is a kicker calculation.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}

impl Evaluator {
    pub fn strength(&self) -> Strength {
        let value = self.value();
        let kicks = self.kickers(&value);
        Strength::from((value, kicks))
    }

    fn value(&self) -> Value {
        self.flush()
            .or_else(|| self.quads())
            .or_else(|| self.boat())
            .or_else(|| self.straight())
            .or_else(|| self.trips())
            .or_else(|| self.pairs())
            .or_else(|| self.high())
            .expect("at least one card in hand")
    }

    /// a flush decays into a straight flush if its suit connects
    fn flush(&self) -> Option<Value> {
        self.suit().map(|suit| {
            let ranks = self.0.of(&suit);
            match Self::connected(ranks) {
                Some(rank) => Value::StraightFlush(rank),
                None => Value::Flush(Rank::from(ranks)),
            }
        })
    }
    fn quads(&self) -> Option<Value> {
        self.repeats(4, 0).map(Value::FourOAK)
    }
    fn boat(&self) -> Option<Value> {
        self.repeats(3, 0).and_then(|trips| {
            self.repeats(2, u16::from(trips))
                .map(|pair| Value::FullHouse(trips, pair))
        })
    }
    fn straight(&self) -> Option<Value> {
        Self::connected(self.0.ranks()).map(Value::Straight)
    }
    fn trips(&self) -> Option<Value> {
        self.repeats(3, 0).map(Value::ThreeOAK)
    }
    fn pairs(&self) -> Option<Value> {
        self.repeats(2, 0).map(|hi| {
            match self.repeats(2, u16::from(hi)) {
                Some(lo) => Value::TwoPair(hi, lo),
                None => Value::OnePair(hi),
            }
        })
    }
    fn high(&self) -> Option<Value> {
        self.repeats(1, 0).map(Value::HighCard)
    }

    /// highest rank held at least n times, skipping masked ranks
    fn repeats(&self, n: usize, skip: u16) -> Option<Rank> {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|r| skip & u16::from(*r) == 0)
            .find(|r| self.0.count(r) >= n)
    }
    /// suit held at least 5 times, if any
    fn suit(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|s| self.0.of(s).count_ones() >= 5)
    }
    /// top card of a 5-run in a rank mask, wheel included
    fn connected(ranks: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b1_0000_0000_1111;
        let run = ranks & ranks << 1 & ranks << 2 & ranks << 3 & ranks << 4;
        if run != 0 {
            Some(Rank::from(run))
        } else if ranks & WHEEL == WHEEL {
            Some(Rank::Five)
        } else {
            None
        }
    }

    fn kickers(&self, value: &Value) -> Kickers {
        match value {
            // a flush is broken only by its own five cards
            Value::Flush(_) => {
                let suit = self.suit().expect("flush has a suit");
                Kickers::from(Self::top(self.0.of(&suit), 5))
            }
            value => {
                let spare = self.0.ranks() & !value.mask();
                Kickers::from(Self::top(spare, value.n_kickers()))
            }
        }
    }
    /// keep the n highest bits of a mask
    fn top(mut bits: u16, n: usize) -> u16 {
        while bits.count_ones() as usize > n {
            bits &= bits - 1;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Value {
        Strength::from(s.parse::<Hand>().unwrap()).value()
    }
    fn strength(s: &str) -> Strength {
        Strength::from(s.parse::<Hand>().unwrap())
    }

    #[test]
    fn high_card() {
        assert_eq!(value("AsKhQdJc9s"), Value::HighCard(Rank::Ace));
    }

    #[test]
    fn one_pair() {
        assert_eq!(value("AsAhKdQcJs"), Value::OnePair(Rank::Ace));
    }

    #[test]
    fn two_pair() {
        assert_eq!(value("AsAhKdKcQs"), Value::TwoPair(Rank::Ace, Rank::King));
    }

    #[test]
    fn three_oak() {
        assert_eq!(value("AsAhAdKcQs"), Value::ThreeOAK(Rank::Ace));
    }

    #[test]
    fn straight() {
        assert_eq!(value("TsJhQdKcAs"), Value::Straight(Rank::Ace));
    }

    #[test]
    fn wheel_straight() {
        assert_eq!(value("As2h3d4c5s"), Value::Straight(Rank::Five));
    }

    #[test]
    fn flush() {
        assert_eq!(value("AsKsQsJs9s"), Value::Flush(Rank::Ace));
    }

    #[test]
    fn full_house() {
        assert_eq!(value("AsAhAdKcKs"), Value::FullHouse(Rank::Ace, Rank::King));
    }

    #[test]
    fn four_oak() {
        assert_eq!(value("AsAhAdAcKs"), Value::FourOAK(Rank::Ace));
    }

    #[test]
    fn straight_flush() {
        assert_eq!(value("TsJsQsKsAs"), Value::StraightFlush(Rank::Ace));
    }

    #[test]
    fn wheel_straight_flush() {
        assert_eq!(value("As2s3s4s5s"), Value::StraightFlush(Rank::Five));
    }

    #[test]
    fn seven_card_best_five() {
        assert_eq!(
            value("AsAhKdKcQsJh9d"),
            Value::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn flush_beats_straight_in_same_hand() {
        assert_eq!(value("4h6h7h8h9hTs"), Value::Flush(Rank::Nine));
    }

    #[test]
    fn two_trips_make_boat() {
        assert_eq!(
            value("AsAhAdKcKsKh2d"),
            Value::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn quads_beat_boat_in_same_hand() {
        assert_eq!(value("AsAhAdAcKsKhQd"), Value::FourOAK(Rank::Ace));
    }

    #[test]
    fn three_pair_takes_top_two() {
        assert_eq!(
            value("AsAhKdKcQsQh2d"),
            Value::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn six_card_straight_takes_top() {
        assert_eq!(value("As2s3h4d5c6s"), Value::Straight(Rank::Six));
    }

    #[test]
    fn royal_beats_aces_full() {
        assert!(strength("AhKhQhJhTh") > strength("AdAcAsKdKc"));
    }

    #[test]
    fn wheel_flush_beats_quads() {
        assert!(strength("5h4h3h2hAh") > strength("AdAcAsAhKd"));
    }

    #[test]
    fn kickers_break_pairs() {
        assert!(strength("AsAhKdQcJs") > strength("AdAcKhQsTs"));
        assert_eq!(strength("AsAhKdQcJs"), strength("AdAcKhQsJd"));
    }

    #[test]
    fn kickers_break_flushes() {
        assert!(strength("AsKsQsJs9s") > strength("AhKhQhJh8h"));
    }

    #[test]
    fn seven_card_equals_best_five_subset() {
        use crate::cards::card::Card;
        use crate::cards::deck::Deck;
        use rand::rngs::SmallRng;
        use rand::SeedableRng;
        let mut rng = SmallRng::seed_from_u64(0xCA9D5);
        for _ in 0..200 {
            let mut deck = Deck::new();
            deck.shuffle(&mut rng);
            let cards = Vec::<Card>::from(deck.deal(7));
            let whole = Strength::from(Hand::from(cards.clone()));
            let best = (0..7)
                .flat_map(|i| (0..i).map(move |j| (i, j)))
                .map(|(i, j)| {
                    cards
                        .iter()
                        .enumerate()
                        .filter(|(k, _)| *k != i && *k != j)
                        .map(|(_, c)| *c)
                        .collect::<Vec<Card>>()
                })
                .map(|five| Strength::from(Hand::from(five)))
                .max()
                .unwrap();
            assert_eq!(whole, best);
        }
    }
}
