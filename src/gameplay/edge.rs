use crate::error::Error;

/// the tagged bet sizes of the action abstraction.
/// Min is a third of pot, Mid is pot. the MAX size is Edge::Shove.
#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, PartialEq, Eq)]
pub enum Size {
    Min,
    Mid,
}

/// an abstract action: what the tree and the info set keys see.
/// chip amounts are resolved against a Game via actionize.
#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, PartialEq, Eq)]
pub enum Edge {
    Fold,
    Check,
    Call,
    Raise(Size),
    Shove,
}

impl Edge {
    pub fn is_aggro(&self) -> bool {
        matches!(self, Edge::Raise(_) | Edge::Shove)
    }
}

/// u8 isomorphism, for artifact records
impl From<Edge> for u8 {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Fold => 0,
            Edge::Check => 1,
            Edge::Call => 2,
            Edge::Raise(Size::Min) => 3,
            Edge::Raise(Size::Mid) => 4,
            Edge::Shove => 5,
        }
    }
}
impl TryFrom<u8> for Edge {
    type Error = Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Edge::Fold),
            1 => Ok(Edge::Check),
            2 => Ok(Edge::Call),
            3 => Ok(Edge::Raise(Size::Min)),
            4 => Ok(Edge::Raise(Size::Mid)),
            5 => Ok(Edge::Shove),
            _ => Err(Error::Parse(format!("not an edge tag: {}", n))),
        }
    }
}

/// `f | k | c | bMIN | bMID | bMAX`
impl std::str::FromStr for Edge {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f" => Ok(Edge::Fold),
            "k" => Ok(Edge::Check),
            "c" => Ok(Edge::Call),
            "bMIN" => Ok(Edge::Raise(Size::Min)),
            "bMID" => Ok(Edge::Raise(Size::Mid)),
            "bMAX" => Ok(Edge::Shove),
            _ => Err(Error::Parse(format!("not an edge: {}", s))),
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Edge::Fold => write!(f, "f"),
            Edge::Check => write!(f, "k"),
            Edge::Call => write!(f, "c"),
            Edge::Raise(Size::Min) => write!(f, "bMIN"),
            Edge::Raise(Size::Mid) => write!(f, "bMID"),
            Edge::Shove => write!(f, "bMAX"),
        }
    }
}

impl crate::Arbitrary for Edge {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..6u8) {
            0 => Edge::Fold,
            1 => Edge::Check,
            2 => Edge::Call,
            3 => Edge::Raise(Size::Min),
            4 => Edge::Raise(Size::Mid),
            _ => Edge::Shove,
        }
    }
}
