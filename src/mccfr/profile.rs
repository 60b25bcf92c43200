use super::bucket::Bucket;
use super::config::Variant;
use super::infoset::InfoSet;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::edge::Edge;
use crate::Probability;
use crate::Utility;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use byteorder::BE;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs::File;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::RwLock;

const MAGIC: &[u8; 8] = b"HUNLHE\r\n";
const VERSION: u32 = 1;
/// strategy sums are weighted 1 per visit. linear weighting would
/// be a different artifact.
const WEIGHTING_UNIFORM: u8 = 0;

/// the strategy store: everything we learn.
///
/// info sets are sharded by key hash behind RwLocks so parallel
/// traversals accumulate without lost updates. flushes happen at
/// batch barriers when no worker holds a lock, so the serialized
/// snapshot is consistent by construction.
pub struct Profile {
    shards: Vec<RwLock<HashMap<Bucket, InfoSet>>>,
    epochs: AtomicUsize,
    variant: Variant,
    checksum: u64,
}

impl Profile {
    pub fn new(variant: Variant, checksum: u64) -> Self {
        Self {
            shards: (0..crate::PROFILE_SHARD_COUNT)
                .map(|_| RwLock::new(HashMap::new()))
                .collect(),
            epochs: AtomicUsize::new(0),
            variant,
            checksum,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn checksum(&self) -> u64 {
        self.checksum
    }
    pub fn epochs(&self) -> usize {
        self.epochs.load(Ordering::Relaxed)
    }
    /// increment the epoch counter and return the new count
    pub fn next(&self) -> usize {
        self.epochs.fetch_add(1, Ordering::Relaxed) + 1
    }
    pub fn size(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.read().expect("shard lock").len())
            .sum()
    }

    /// idempotent initialization of an info set.
    ///
    /// first writer registers the action list; everyone after only
    /// verifies it. a mismatch means two different decisions hashed
    /// into one key, which poisons everything downstream.
    pub fn witness(&self, bucket: &Bucket, edges: &[Edge]) -> Result<()> {
        let mut shard = self.shard(bucket).write().expect("shard lock");
        match shard.get(bucket) {
            Some(infoset) if infoset.edges() != edges => Err(Error::Invariant(format!(
                "action list mismatch at {}: {:?} vs {:?}",
                bucket,
                infoset.edges(),
                edges,
            ))),
            Some(_) => Ok(()),
            None => {
                shard.insert(bucket.clone(), InfoSet::new(edges.to_vec()));
                Ok(())
            }
        }
    }

    /// current strategy by regret matching
    pub fn policy(&self, bucket: &Bucket) -> Vec<Probability> {
        self.shard(bucket)
            .read()
            .expect("shard lock")
            .get(bucket)
            .expect("bucket witnessed before policy")
            .policy()
    }

    /// published average strategy, if this key was ever visited
    pub fn average(&self, bucket: &Bucket) -> Option<Vec<(Edge, Probability)>> {
        self.shard(bucket)
            .read()
            .expect("shard lock")
            .get(bucket)
            .map(|infoset| {
                infoset
                    .edges()
                    .iter()
                    .copied()
                    .zip(infoset.average())
                    .collect()
            })
    }

    pub fn add_regret(&self, bucket: &Bucket, deltas: &[Utility]) -> Result<()> {
        if deltas.iter().any(|d| d.is_nan()) {
            return Err(Error::Invariant(format!("NaN regret at {}", bucket)));
        }
        self.shard(bucket)
            .write()
            .expect("shard lock")
            .get_mut(bucket)
            .expect("bucket witnessed before update")
            .add_regret(deltas);
        Ok(())
    }

    pub fn add_policy(&self, bucket: &Bucket, policy: &[Probability]) -> Result<()> {
        if policy.iter().any(|p| p.is_nan()) {
            return Err(Error::Invariant(format!("NaN policy at {}", bucket)));
        }
        self.shard(bucket)
            .write()
            .expect("shard lock")
            .get_mut(bucket)
            .expect("bucket witnessed before update")
            .add_policy(policy);
        Ok(())
    }

    /// ordered snapshot of every info set
    pub fn records(&self) -> BTreeMap<Bucket, InfoSet> {
        self.shards
            .iter()
            .flat_map(|s| {
                s.read()
                    .expect("shard lock")
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn shard(&self, bucket: &Bucket) -> &RwLock<HashMap<Bucket, InfoSet>> {
        let ref mut hasher = DefaultHasher::new();
        bucket.hash(hasher);
        let index = hasher.finish() as usize % self.shards.len();
        &self.shards[index]
    }

    fn insert(&self, bucket: Bucket, infoset: InfoSet) {
        self.shard(&bucket)
            .write()
            .expect("shard lock")
            .insert(bucket, infoset);
    }
}

// artifact persistence

impl Profile {
    /// write-to-temp then atomic rename, so readers never observe
    /// a half-written artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        let records = self.records();
        let temp = path.with_extension("profile.tmp");
        let ref mut writer = BufWriter::new(File::create(&temp)?);
        writer.write_all(MAGIC)?;
        writer.write_u32::<BE>(VERSION)?;
        writer.write_u64::<BE>(self.epochs() as u64)?;
        writer.write_u64::<BE>(Self::timestamp())?;
        writer.write_u8(u8::from(self.variant))?;
        writer.write_u8(WEIGHTING_UNIFORM)?;
        writer.write_u64::<BE>(self.checksum)?;
        writer.write_u64::<BE>(records.len() as u64)?;
        for (bucket, infoset) in records {
            let key = bucket.to_string();
            writer.write_u16::<BE>(key.len() as u16)?;
            writer.write_all(key.as_bytes())?;
            writer.write_u8(infoset.edges().len() as u8)?;
            for edge in infoset.edges() {
                writer.write_u8(u8::from(*edge))?;
            }
            for regret in infoset.regrets() {
                writer.write_f64::<BE>(*regret)?;
            }
            for weight in infoset.weights() {
                writer.write_f64::<BE>(*weight)?;
            }
        }
        writer.flush()?;
        std::fs::rename(temp, path)?;
        log::info!("saved profile ({} infosets)", self.size());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::Artifact(format!("{}: {}", path.display(), e)))?;
        let mut reader = BufReader::new(file);
        let mut magic = [0u8; 8];
        reader
            .read_exact(&mut magic)
            .map_err(|_| Error::Artifact("truncated header".to_string()))?;
        if &magic != MAGIC {
            return Err(Error::Artifact("bad magic".to_string()));
        }
        let version = reader.read_u32::<BE>()?;
        if version != VERSION {
            return Err(Error::Artifact(format!("artifact version {}", version)));
        }
        let epochs = reader.read_u64::<BE>()?;
        let _timestamp = reader.read_u64::<BE>()?;
        let variant = Variant::try_from(reader.read_u8()?)?;
        let weighting = reader.read_u8()?;
        if weighting != WEIGHTING_UNIFORM {
            return Err(Error::Artifact(format!("unknown weighting {}", weighting)));
        }
        let checksum = reader.read_u64::<BE>()?;
        let count = reader.read_u64::<BE>()?;
        let profile = Self::new(variant, checksum);
        profile.epochs.store(epochs as usize, Ordering::Relaxed);
        for _ in 0..count {
            let len = reader.read_u16::<BE>()? as usize;
            let mut key = vec![0u8; len];
            reader.read_exact(&mut key)?;
            let bucket = std::str::from_utf8(&key)
                .map_err(|_| Error::Artifact("non-utf8 key".to_string()))?
                .parse::<Bucket>()
                .map_err(|e| Error::Artifact(format!("unreadable key: {}", e)))?;
            let n = reader.read_u8()? as usize;
            let edges = (0..n)
                .map(|_| Edge::try_from(reader.read_u8()?))
                .collect::<std::result::Result<Vec<Edge>, _>>()
                .map_err(|e| Error::Artifact(format!("unreadable edge: {}", e)))?;
            let regrets = (0..n)
                .map(|_| reader.read_f64::<BE>())
                .collect::<std::result::Result<Vec<Utility>, _>>()?;
            let weights = (0..n)
                .map(|_| reader.read_f64::<BE>())
                .collect::<std::result::Result<Vec<Utility>, _>>()?;
            profile.insert(bucket, InfoSet::from((edges, regrets, weights)));
        }
        log::info!("loaded profile ({} infosets)", profile.size());
        Ok(profile)
    }

    fn timestamp() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time moves forward")
            .as_secs()
    }
}

impl crate::Arbitrary for Profile {
    fn random() -> Self {
        let profile = Self::new(Variant::Preflop, 0xABC123);
        for _ in 0..100 {
            profile.insert(Bucket::random(), InfoSet::random());
        }
        profile.epochs.store(42, Ordering::Relaxed);
        profile
    }
}
