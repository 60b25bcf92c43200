use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::error::Error;

/// Abstraction is the bucket half of an info set key.
///
/// - Preflop: the 169 strategically distinct hole classes, lossless.
///   we index a 13x13 grid by (hi, lo) rank: pairs on the diagonal,
///   suited above it, offsuit below it.
/// - Postflop: the index of the nearest learned centroid for the
///   street, assigned at runtime by the Lookup.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Abstraction {
    Preflop(u8),
    Cluster(Street, u8),
}

impl Abstraction {
    pub fn street(&self) -> Street {
        match self {
            Self::Preflop(_) => Street::Pref,
            Self::Cluster(street, _) => *street,
        }
    }
    pub fn index(&self) -> u8 {
        match self {
            Self::Preflop(i) => *i,
            Self::Cluster(_, i) => *i,
        }
    }
}

/// the lossless preflop map
impl From<Hole> for Abstraction {
    fn from(hole: Hole) -> Self {
        let hi = hole.hi().rank() as u8;
        let lo = hole.lo().rank() as u8;
        match (hole.paired(), hole.suited()) {
            (true, _) => Self::Preflop(hi * 13 + hi),
            (false, true) => Self::Preflop(hi * 13 + lo),
            (false, false) => Self::Preflop(lo * 13 + hi),
        }
    }
}

/// (street, index) isomorphism, for parsing artifact keys
impl TryFrom<(Street, u8)> for Abstraction {
    type Error = Error;
    fn try_from((street, index): (Street, u8)) -> Result<Self, Self::Error> {
        match street {
            Street::Show => Err(Error::Parse("no abstraction at showdown".to_string())),
            Street::Pref if index < 169 => Ok(Self::Preflop(index)),
            Street::Pref => Err(Error::Parse(format!("preflop class {}", index))),
            street => Ok(Self::Cluster(street, index)),
        }
    }
}

impl std::fmt::Display for Abstraction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use std::collections::BTreeSet;

    fn preflop(s: &str) -> Abstraction {
        Abstraction::from(s.parse::<Hole>().unwrap())
    }

    #[test]
    fn exactly_169_preflop_classes() {
        let classes = (0..52u8)
            .flat_map(|a| (0..a).map(move |b| (a, b)))
            .map(|(a, b)| Hole::from((Card::from(a), Card::from(b))))
            .map(Abstraction::from)
            .collect::<BTreeSet<Abstraction>>();
        assert_eq!(classes.len(), 169);
    }

    #[test]
    fn suited_offsuit_distinct() {
        assert_ne!(preflop("AhKh"), preflop("AsKd"));
    }

    #[test]
    fn suit_identity_ignored() {
        assert_eq!(preflop("AhKd"), preflop("AcKs"));
        assert_eq!(preflop("AhKh"), preflop("AsKs"));
        assert_eq!(preflop("AhAd"), preflop("AcAs"));
    }
}
