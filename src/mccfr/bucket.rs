use crate::cards::street::Street;
use crate::clustering::abstraction::Abstraction;
use crate::error::Error;
use crate::gameplay::path::Path;

/// the information set key: everything a player can condition on,
/// coarsened. card information flows through the Abstraction and
/// betting information through the Path. two game states with the
/// same Bucket are the same decision.
///
/// canonical text form is `street|bucket|history`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Bucket(pub Abstraction, pub Path);

impl Bucket {
    pub fn street(&self) -> Street {
        self.0.street()
    }
}

impl From<(Abstraction, Path)> for Bucket {
    fn from((abstraction, path): (Abstraction, Path)) -> Self {
        Self(abstraction, path)
    }
}

impl std::str::FromStr for Bucket {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('|').collect::<Vec<&str>>()[..] {
            [street, index, path] => {
                let street = street.parse::<Street>()?;
                let index = index
                    .parse::<u8>()
                    .map_err(|_| Error::Parse(format!("not a bucket index: {}", index)))?;
                let abstraction = Abstraction::try_from((street, index))?;
                let path = path.parse::<Path>()?;
                Ok(Self(abstraction, path))
            }
            _ => Err(Error::Parse(format!("not a bucket key: {}", s))),
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.street(), self.0, self.1)
    }
}

impl crate::Arbitrary for Bucket {
    fn random() -> Self {
        use crate::gameplay::edge::Edge;
        use rand::Rng;
        let ref mut rng = rand::rng();
        let abstraction = match rng.random_range(0..4u8) {
            0 => Abstraction::Preflop(rng.random_range(0..169)),
            1 => Abstraction::Cluster(Street::Flop, rng.random_range(0..50)),
            2 => Abstraction::Cluster(Street::Turn, rng.random_range(0..50)),
            _ => Abstraction::Cluster(Street::Rive, rng.random_range(0..10)),
        };
        let mut path = Path::default();
        for _ in 0..rng.random_range(0..3) {
            path.push(Edge::random());
        }
        Self(abstraction, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn bijective_text() {
        for _ in 0..100 {
            let bucket = Bucket::random();
            assert_eq!(bucket, bucket.to_string().parse().unwrap());
        }
    }

    #[test]
    fn key_shape() {
        let bucket = Bucket(
            Abstraction::Cluster(Street::Flop, 17),
            "c/kbMID".parse().unwrap(),
        );
        assert_eq!(bucket.to_string(), "flop|17|c/kbMID");
    }
}
