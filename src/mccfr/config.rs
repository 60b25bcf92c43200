use crate::error::Error;
use std::path::PathBuf;

/// which game the engine is solving.
///
/// Preflop treats the flop transition as a synthetic terminal paying
/// pot-weighted preflop equity; Postflop conditions on a reached flop
/// and solves the subtree. same engine, different terminal predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Preflop,
    Postflop,
}

impl From<Variant> for u8 {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Preflop => 0,
            Variant::Postflop => 1,
        }
    }
}
impl TryFrom<u8> for Variant {
    type Error = Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Variant::Preflop),
            1 => Ok(Variant::Postflop),
            _ => Err(Error::Artifact(format!("unknown variant {}", n))),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Variant::Preflop => write!(f, "preflop"),
            Variant::Postflop => write!(f, "postflop"),
        }
    }
}

/// everything a training run needs, threaded explicitly instead of
/// living in process-wide state.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub variant: Variant,
    pub batches: usize,
    pub iterations: usize,
    pub workers: usize,
    pub seed: u64,
    pub output: PathBuf,
    pub centroids: Option<PathBuf>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Preflop,
            batches: crate::CFR_BATCH_COUNT,
            iterations: crate::CFR_BATCH_SIZE,
            workers: num_cpus::get(),
            seed: 0,
            output: PathBuf::from("blueprint.profile"),
            centroids: None,
        }
    }
}
