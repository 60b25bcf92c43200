use super::bucket::Bucket;
use crate::cards::observation::Observation;
use crate::cards::street::Street;
use crate::clustering::abstraction::Abstraction;
use crate::clustering::lookup::Lookup;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::game::Game;
use crate::gameplay::path::Path as History;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::path::Path;

/// turns live card information into info set keys.
///
/// preflop goes through the lossless 169-class map and needs no
/// tables; postflop goes through whichever centroid tables are
/// loaded. the same Encoder serves training and query, which is
/// what makes their keys agree.
#[derive(Default)]
pub struct Encoder {
    flop: Option<Lookup>,
    turn: Option<Lookup>,
    rive: Option<Lookup>,
}

impl Encoder {
    /// preflop-only encoding, no tables required
    pub fn empty() -> Self {
        Self::default()
    }

    /// load all three street tables or fail
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            flop: Some(Lookup::load(dir, Street::Flop)?),
            turn: Some(Lookup::load(dir, Street::Turn)?),
            rive: Some(Lookup::load(dir, Street::Rive)?),
        })
    }

    /// best-effort load for the query service, which can fall back
    /// to its equity heuristic on the streets it is missing
    pub fn relaxed(dir: &Path) -> Self {
        let mut encoder = Self::default();
        for street in [Street::Flop, Street::Turn, Street::Rive] {
            match Lookup::load(dir, street) {
                Ok(lookup) => encoder.set(lookup),
                Err(e) => log::warn!("no {} table: {}", street, e),
            }
        }
        encoder
    }

    fn set(&mut self, lookup: Lookup) {
        match lookup.street() {
            Street::Flop => self.flop = Some(lookup),
            Street::Turn => self.turn = Some(lookup),
            Street::Rive => self.rive = Some(lookup),
            _ => unreachable!("no tables off the postflop streets"),
        }
    }

    fn lookup(&self, street: Street) -> Result<&Lookup> {
        match street {
            Street::Flop => self.flop.as_ref(),
            Street::Turn => self.turn.as_ref(),
            Street::Rive => self.rive.as_ref(),
            _ => None,
        }
        .ok_or(Error::Abstraction(street))
    }

    pub fn abstraction(&self, observation: &Observation) -> Result<Abstraction> {
        match observation.street() {
            Street::Pref => Ok(Abstraction::from(
                crate::cards::hole::Hole::try_from(observation.secret())?,
            )),
            street => Ok(self.lookup(street)?.abstraction(observation)),
        }
    }

    /// the full key derivation: what the actor sees, coarsened,
    /// joined with the betting history so far
    pub fn bucket(&self, game: &Game, history: &History) -> Result<Bucket> {
        let abstraction = self.abstraction(&game.sweat())?;
        Ok(Bucket::from((abstraction, history.clone())))
    }

    /// fingerprint of the whole abstraction: the preflop grid is
    /// structural, so only the learned tables contribute
    pub fn checksum(&self) -> u64 {
        let ref mut hasher = DefaultHasher::new();
        169u64.hash(hasher);
        for lookup in [&self.flop, &self.turn, &self.rive] {
            match lookup {
                Some(lookup) => lookup.checksum().hash(hasher),
                None => 0u64.hash(hasher),
            }
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hole::Hole;

    #[test]
    fn preflop_needs_no_tables() {
        let encoder = Encoder::empty();
        let game = Game::root(["AhKh".parse().unwrap(), "2c3d".parse().unwrap()]);
        let bucket = encoder.bucket(&game, &History::default()).unwrap();
        assert_eq!(bucket.street(), Street::Pref);
    }

    #[test]
    fn suited_and_offsuit_diverge() {
        let suited: Hole = "AhKh".parse().unwrap();
        let offsuit: Hole = "AsKd".parse().unwrap();
        assert_ne!(
            Abstraction::from(suited), //
            Abstraction::from(offsuit),
        );
    }

    #[test]
    fn postflop_without_tables_is_a_miss() {
        let encoder = Encoder::empty();
        let observation = Observation::from(Street::Flop);
        assert!(matches!(
            encoder.abstraction(&observation),
            Err(Error::Abstraction(Street::Flop))
        ));
    }
}
