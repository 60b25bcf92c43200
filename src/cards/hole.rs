use super::card::Card;
use super::hand::Hand;
use crate::error::Error;

/// a player's two private cards, ordered by rank descending
/// so that equal holes compare equal regardless of deal order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hole {
    hi: Card,
    lo: Card,
}

impl Hole {
    pub fn hi(&self) -> Card {
        self.hi
    }
    pub fn lo(&self) -> Card {
        self.lo
    }
    pub fn suited(&self) -> bool {
        self.hi.suit() == self.lo.suit()
    }
    pub fn paired(&self) -> bool {
        self.hi.rank() == self.lo.rank()
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        assert!(a != b, "hole cards must be distinct");
        if a.rank() >= b.rank() {
            Self { hi: a, lo: b }
        } else {
            Self { hi: b, lo: a }
        }
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        Hand::add(Hand::from(hole.hi), Hand::from(hole.lo))
    }
}

impl TryFrom<Hand> for Hole {
    type Error = Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        let cards = Vec::<Card>::from(hand);
        match cards[..] {
            [a, b] => Ok(Self::from((a, b))),
            _ => Err(Error::Parse(format!("not a hole pair: {}", hand))),
        }
    }
}

impl std::str::FromStr for Hole {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.parse::<Hand>()?)
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.hi, self.lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_normalized() {
        let ak = "AhKd".parse::<Hole>().unwrap();
        let ka = "KdAh".parse::<Hole>().unwrap();
        assert_eq!(ak, ka);
    }

    #[test]
    fn suitedness() {
        assert!("AhKh".parse::<Hole>().unwrap().suited());
        assert!(!"AhKd".parse::<Hole>().unwrap().suited());
        assert!("AhAd".parse::<Hole>().unwrap().paired());
    }
}
