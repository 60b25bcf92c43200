use super::card::Card;
use super::hand::Hand;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// a permutation of the cards not yet seen.
/// dealing removes from the tail without replacement.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn new() -> Self {
        Self((0..52).map(Card::from).collect())
    }
    pub fn shuffle(&mut self, rng: &mut SmallRng) {
        self.0.shuffle(rng);
    }
    pub fn draw(&mut self) -> Card {
        self.0.pop().expect("enough cards in deck")
    }
    pub fn deal(&mut self, n: usize) -> Hand {
        Hand::from((0..n).map(|_| self.draw()).collect::<Vec<Card>>())
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
}

/// the deck left over once the argument cards are dead
impl From<Hand> for Deck {
    fn from(blockers: Hand) -> Self {
        Self(Vec::<Card>::from(blockers.complement()))
    }
}
