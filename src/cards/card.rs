use super::rank::Rank;
use super::suit::Suit;
use crate::error::Error;

/// a Card is an index into the 52-card deck.
/// rank majors and suit minors, so 0 is 2c and 51 is As.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
}

/// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "card index out of range");
        Self(n)
    }
}

/// u64 isomorphism, one-hot
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << c.0
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self((rank as u8) * 4 + (suit as u8))
    }
}

/// two-character ASCII form, rank then suit
impl std::str::FromStr for Card {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => {
                let rank = Rank::try_from(r)?;
                let suit = Suit::try_from(s)?;
                Ok(Self::from((rank, suit)))
            }
            _ => Err(Error::Parse(format!("not a card: {}", s))),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        assert!((0..52u8).all(|n| n == u8::from(Card::from(n))));
    }

    #[test]
    fn bijective_text() {
        assert!((0..52u8)
            .map(Card::from)
            .all(|c| c == c.to_string().parse().unwrap()));
    }

    #[test]
    fn parse_suit_case() {
        assert!("Ah".parse::<Card>().is_ok());
        assert!("ah".parse::<Card>().is_ok());
        assert!("AH".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
        assert!("Ahh".parse::<Card>().is_err());
    }
}
