use super::config::TrainingConfig;
use super::config::Variant;
use super::encoder::Encoder;
use super::profile::Profile;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::observation::Observation;
use crate::cards::rank::Rank;
use crate::cards::street::Street;
use crate::cards::suit::Suit;
use crate::clustering::abstraction::Abstraction;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::deal::Deal;
use crate::gameplay::game::Game;
use crate::gameplay::path::Path;
use crate::gameplay::turn::Turn;
use crate::Equity;
use crate::Probability;
use crate::Utility;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::OnceLock;

const PREFLOP_EQUITY_SAMPLES: usize = 2_000;

/// external-sampling MCCFR over the abstracted game.
///
/// each epoch deals one chance outcome and walks the tree twice,
/// once per updating player. the walker's actions are enumerated,
/// the opponent's are sampled from the current regret-matched
/// strategy, and chance was already sampled at the root. batches
/// are checkpointed to the artifact and resumable.
pub struct Trainer {
    profile: Profile,
    encoder: Encoder,
    config: TrainingConfig,
    cancel: Arc<AtomicBool>,
    preflop: OnceLock<Vec<Equity>>,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self> {
        let encoder = match config.variant {
            Variant::Preflop => Encoder::empty(),
            Variant::Postflop => match config.centroids.as_deref() {
                Some(dir) => Encoder::load(dir)?,
                None => return Err(Error::Abstraction(Street::Flop)),
            },
        };
        let profile = match config.output.exists() {
            false => Profile::new(config.variant, encoder.checksum()),
            true => {
                let profile = Profile::load(&config.output)?;
                if profile.variant() != config.variant {
                    return Err(Error::Artifact(format!(
                        "resuming {} artifact as {}",
                        profile.variant(),
                        config.variant,
                    )));
                }
                if profile.checksum() != encoder.checksum() {
                    return Err(Error::Artifact("abstraction checksum drift".to_string()));
                }
                log::info!("resuming from {} epochs", profile.epochs());
                profile
            }
        };
        Ok(Self {
            profile,
            encoder,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
            preflop: OnceLock::new(),
        })
    }

    /// flip this from anywhere to stop at the next batch boundary
    pub fn canceller(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// the training loop: batches of iterations split across
    /// workers, a durable checkpoint in between
    pub fn train(self) -> Result<Profile> {
        log::info!(
            "training {} blueprint ({} batches of {})",
            self.config.variant,
            self.config.batches,
            self.config.iterations,
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .expect("worker pool");
        for batch in 0..self.config.batches {
            if self.cancel.load(Ordering::Relaxed) {
                log::warn!("training cancelled at batch {}", batch);
                break;
            }
            pool.install(|| {
                (0..self.config.iterations)
                    .into_par_iter()
                    .try_for_each(|_| self.iterate())
            })?;
            self.profile.save(&self.config.output)?;
            log::info!(
                "batch {:>3} of {} ~ {} infosets over {} epochs",
                batch + 1,
                self.config.batches,
                self.profile.size(),
                self.profile.epochs(),
            );
        }
        Ok(self.profile)
    }

    /// one epoch: a fresh chance outcome, both walkers.
    /// recoverable errors discard the traversal; invariant
    /// violations abort the batch with the last checkpoint intact.
    fn iterate(&self) -> Result<()> {
        let epoch = self.profile.next();
        let ref mut rng = SmallRng::seed_from_u64(self.seed(epoch));
        let ref deal = Deal::random(rng);
        for walker in 0..crate::N {
            match self.expand(deal, walker, rng) {
                Ok(_) => {}
                Err(e @ Error::Invariant(_)) => return Err(e),
                Err(e) => log::warn!("discarding traversal: {}", e),
            }
        }
        Ok(())
    }

    fn expand(&self, deal: &Deal, walker: usize, rng: &mut SmallRng) -> Result<Utility> {
        let (game, path) = self.root(deal)?;
        self.traverse(&game, &path, deal, walker, rng)
    }

    /// where an iteration starts. the postflop variant conditions
    /// on a flop reached by a limp-check line
    fn root(&self, deal: &Deal) -> Result<(Game, Path)> {
        let game = Game::root(deal.holes());
        match self.config.variant {
            Variant::Preflop => Ok((game, Path::default())),
            Variant::Postflop => {
                use crate::gameplay::edge::Edge;
                let mut path = Path::default();
                let game = game.apply(game.actionize(&Edge::Call))?;
                path.push(Edge::Call);
                let game = game.apply(game.actionize(&Edge::Check))?;
                path.push(Edge::Check);
                let game = game.reveal(deal.reveal(Street::Pref));
                path.advance();
                Ok((game, path))
            }
        }
    }

    fn traverse(
        &self,
        game: &Game,
        path: &Path,
        deal: &Deal,
        walker: usize,
        rng: &mut SmallRng,
    ) -> Result<Utility> {
        match game.turn() {
            Turn::Terminal => Ok(game.payoff(walker)),
            Turn::Chance => {
                if self.config.variant == Variant::Preflop && game.street() == Street::Pref {
                    return Ok(self.preflop_payoff(game, walker));
                }
                let next = game.reveal(deal.reveal(game.street()));
                self.traverse(&next, &path.advanced(), deal, walker, rng)
            }
            Turn::Choice(actor) => {
                let bucket = self.encoder.bucket(game, path)?;
                let edges = game.edges();
                self.profile.witness(&bucket, &edges)?;
                let policy = self.profile.policy(&bucket);
                if actor == walker {
                    let mut utilities = Vec::with_capacity(edges.len());
                    for edge in edges.iter() {
                        let next = game.apply(game.actionize(edge))?;
                        utilities.push(self.traverse(&next, &path.pushed(*edge), deal, walker, rng)?);
                    }
                    let value = policy
                        .iter()
                        .zip(utilities.iter())
                        .map(|(p, u)| p * u)
                        .sum::<Utility>();
                    let regrets = utilities.iter().map(|u| u - value).collect::<Vec<Utility>>();
                    self.profile.add_regret(&bucket, &regrets)?;
                    Ok(value)
                } else {
                    self.profile.add_policy(&bucket, &policy)?;
                    let edge = edges[Self::sample(&policy, rng)];
                    let next = game.apply(game.actionize(&edge))?;
                    self.traverse(&next, &path.pushed(edge), deal, walker, rng)
                }
            }
        }
    }

    /// synthetic terminal for the preflop variant: the hand plays
    /// for pot-weighted equity of the walker's preflop class against
    /// a uniform opponent. zero-sum by construction.
    fn preflop_payoff(&self, game: &Game, walker: usize) -> Utility {
        let class = Abstraction::from(game.seat(walker).cards()).index();
        let equity = self.equities()[class as usize];
        equity * game.pot() as Utility - game.seat(walker).spent() as Utility
    }

    /// lazily built 169-entry preflop equity table, fixed seeds so
    /// every run agrees on the synthetic payoffs
    fn equities(&self) -> &[Equity] {
        self.preflop.get_or_init(|| {
            log::info!("rolling out preflop equity table");
            (0..169u8)
                .into_par_iter()
                .map(|class| {
                    let hole = Hand::from(Self::representative(class));
                    let ref mut rng = SmallRng::seed_from_u64(class as u64);
                    Observation::from((hole, Hand::empty()))
                        .simulate(PREFLOP_EQUITY_SAMPLES, rng)
                })
                .collect()
        })
    }

    /// a concrete hole pair for each of the 169 grid classes
    fn representative(class: u8) -> Hole {
        let row = Rank::from(class / 13);
        let col = Rank::from(class % 13);
        match (class / 13).cmp(&(class % 13)) {
            std::cmp::Ordering::Equal => Hole::from((
                Card::from((row, Suit::H)), //
                Card::from((row, Suit::D)),
            )),
            std::cmp::Ordering::Greater => Hole::from((
                Card::from((row, Suit::H)), //
                Card::from((col, Suit::H)),
            )),
            std::cmp::Ordering::Less => Hole::from((
                Card::from((col, Suit::H)), //
                Card::from((row, Suit::D)),
            )),
        }
    }

    /// deterministic per-epoch RNG stream off the master seed
    fn seed(&self, epoch: usize) -> u64 {
        let ref mut hasher = DefaultHasher::new();
        self.config.seed.hash(hasher);
        epoch.hash(hasher);
        hasher.finish()
    }

    /// draw an index from a probability vector
    fn sample(policy: &[Probability], rng: &mut SmallRng) -> usize {
        let mut draw = rng.random::<Probability>() * policy.iter().sum::<Probability>();
        for (index, p) in policy.iter().enumerate() {
            draw -= p;
            if draw <= 0. {
                return index;
            }
        }
        policy.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::bucket::Bucket;

    fn config(name: &str, batches: usize, iterations: usize) -> TrainingConfig {
        TrainingConfig {
            variant: Variant::Preflop,
            batches,
            iterations,
            workers: 2,
            seed: 7,
            output: std::env::temp_dir().join(name),
            centroids: None,
        }
    }

    fn aces() -> Bucket {
        Bucket::from((Abstraction::Preflop(168), Path::default()))
    }

    #[test]
    fn smoke_trains_and_checkpoints() {
        let config = config("headsup-smoke.profile", 1, 64);
        let output = config.output.clone();
        let _ = std::fs::remove_file(&output);
        let profile = Trainer::new(config).unwrap().train().unwrap();
        assert!(output.exists());
        assert!(profile.size() > 0);
        assert_eq!(profile.epochs(), 64);
        assert!(profile
            .records()
            .values()
            .all(|i| i.weights().iter().all(|w| *w >= 0.)));
        assert!(profile
            .records()
            .values()
            .all(|i| i.regrets().iter().all(|r| !r.is_nan())));
        std::fs::remove_file(output).unwrap();
    }

    #[test]
    fn resumes_additively() {
        let first = config("headsup-resume.profile", 1, 32);
        let output = first.output.clone();
        let _ = std::fs::remove_file(&output);
        Trainer::new(first.clone()).unwrap().train().unwrap();
        let resumed = Trainer::new(first).unwrap();
        assert_eq!(resumed.profile().epochs(), 32);
        let profile = resumed.train().unwrap();
        assert_eq!(profile.epochs(), 64);
        std::fs::remove_file(output).unwrap();
    }

    #[test]
    fn cancellation_respects_batch_boundary() {
        let config = config("headsup-cancel.profile", 4, 32);
        let output = config.output.clone();
        let _ = std::fs::remove_file(&output);
        let trainer = Trainer::new(config).unwrap();
        trainer.canceller().store(true, Ordering::Relaxed);
        let profile = trainer.train().unwrap();
        assert_eq!(profile.epochs(), 0);
        assert!(!output.exists());
    }

    #[test]
    fn representatives_cover_the_grid() {
        use std::collections::BTreeSet;
        let classes = (0..169u8)
            .map(Trainer::representative)
            .map(Abstraction::from)
            .collect::<BTreeSet<Abstraction>>();
        assert_eq!(classes.len(), 169);
        assert!((0..169u8).all(|c| Abstraction::from(Trainer::representative(c)).index() == c));
    }

    #[test]
    fn preflop_terminals_split_the_pot() {
        let config = config("headsup-synthetic-unused.profile", 1, 1);
        let trainer = Trainer::new(config).unwrap();
        let ref mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            let deal = Deal::random(rng);
            let game = Game::root(deal.holes());
            let game = game.apply(crate::gameplay::action::Action::Call(1)).unwrap();
            let game = game.apply(crate::gameplay::action::Action::Check).unwrap();
            for walker in 0..crate::N {
                let payoff = trainer.preflop_payoff(&game, walker);
                let spent = game.seat(walker).spent() as Utility;
                let pot = game.pot() as Utility;
                assert!(payoff >= -spent);
                assert!(payoff <= pot - spent);
                assert_eq!(payoff, trainer.preflop_payoff(&game, walker));
            }
        }
    }

    #[test]
    fn class_equities_are_ordered() {
        let config = config("headsup-equities-unused.profile", 1, 1);
        let trainer = Trainer::new(config).unwrap();
        let aces = Abstraction::from("AhAd".parse::<Hole>().unwrap()).index();
        let trash = Abstraction::from("2h7d".parse::<Hole>().unwrap()).index();
        assert!(trainer.equities()[aces as usize] > 0.8);
        assert!(trainer.equities()[trash as usize] < 0.45);
    }

    #[test]
    #[ignore]
    fn aces_open_aggressively() {
        crate::init();
        let config = config("headsup-aces.profile", 16, 0x4000);
        let output = config.output.clone();
        let _ = std::fs::remove_file(&output);
        let profile = Trainer::new(config).unwrap().train().unwrap();
        let strategy = profile.average(&aces()).expect("aces visited");
        let aggro = strategy
            .iter()
            .filter(|(e, _)| e.is_aggro())
            .map(|(_, p)| p)
            .sum::<Probability>();
        std::fs::remove_file(output).unwrap();
        assert!(aggro > 0.9, "aces open with {} aggression", aggro);
    }
}
