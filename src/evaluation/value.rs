use crate::cards::rank::Rank;

/// a hand's category, without its kicker cards.
///
/// derived Ord gives the standard poker ordering, with ties
/// inside a category broken by the payload ranks and then by
/// Kickers at the Strength level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Value {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kicker
    ThreeOAK(Rank),        // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 0 kickers
    FullHouse(Rank, Rank), // 0 kickers
    FourOAK(Rank),         // 1 kicker
    StraightFlush(Rank),   // 0 kickers
}

impl Value {
    pub fn n_kickers(&self) -> usize {
        match self {
            Value::HighCard(_) => 4,
            Value::OnePair(_) => 3,
            Value::ThreeOAK(_) => 2,
            Value::FourOAK(_) | Value::TwoPair(_, _) => 1,
            _ => 0,
        }
    }
    /// rank mask of the cards making up the category,
    /// which kickers must avoid
    pub fn mask(&self) -> u16 {
        match *self {
            Value::TwoPair(hi, lo) => u16::from(hi) | u16::from(lo),
            Value::HighCard(hi)
            | Value::OnePair(hi)
            | Value::ThreeOAK(hi)
            | Value::FourOAK(hi) => u16::from(hi),
            _ => 0,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::HighCard(r) => write!(f, "HighCard      {} ", r),
            Value::OnePair(r) => write!(f, "OnePair       {} ", r),
            Value::TwoPair(r1, r2) => write!(f, "TwoPair       {}{}", r1, r2),
            Value::ThreeOAK(r) => write!(f, "ThreeOfAKind  {} ", r),
            Value::Straight(r) => write!(f, "Straight      {} ", r),
            Value::Flush(r) => write!(f, "Flush         {} ", r),
            Value::FullHouse(r1, r2) => write!(f, "FullHouse     {}{}", r1, r2),
            Value::FourOAK(r) => write!(f, "FourOfAKind   {} ", r),
            Value::StraightFlush(r) => write!(f, "StraightFlush {} ", r),
        }
    }
}
