use super::evaluator::Evaluator;
use super::kickers::Kickers;
use super::value::Value;
use crate::cards::hand::Hand;

/// a hand's total showdown strength.
///
/// two Strengths are equal iff the hands tie at showdown. the
/// derived Ord compares category first, then kickers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Value,
    kicks: Kickers,
}

impl Strength {
    pub fn value(&self) -> Value {
        self.value
    }
}

impl From<(Value, Kickers)> for Strength {
    fn from((value, kicks): (Value, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Evaluator::from(hand).strength()
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{:>5}", self.value, self.kicks)
    }
}
