use super::abstraction::Abstraction;
use super::histogram::Histogram;
use super::kmeans::KMeans;
use crate::cards::observation::Observation;
use crate::cards::street::Street;
use crate::error::Error;
use crate::error::Result;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use byteorder::BE;
use std::fs::File;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

const MAGIC: &[u8; 8] = b"HUCENT\r\n";
const VERSION: u32 = 1;

/// the learned centroid table for one street.
///
/// read-only after load. assigning a live observation to a bucket
/// is a nearest-centroid search under the histogram metric, so the
/// abstraction is pure given the table.
pub struct Lookup {
    street: Street,
    centroids: Vec<Histogram>,
}

impl Lookup {
    pub fn new(street: Street, centroids: Vec<Histogram>) -> Self {
        assert!(!centroids.is_empty());
        assert!(centroids.len() <= u8::MAX as usize);
        Self { street, centroids }
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// nearest centroid under the histogram metric
    pub fn abstraction(&self, observation: &Observation) -> Abstraction {
        assert!(observation.street() == self.street);
        let ref histogram = Histogram::from(*observation);
        let index = KMeans::nearest(&self.centroids, histogram);
        log::trace!("bucketed {} into {}", observation, index);
        Abstraction::Cluster(self.street, index as u8)
    }

    /// stable fingerprint over k and the centroid bits.
    /// changing the table invalidates trained artifacts.
    pub fn checksum(&self) -> u64 {
        let ref mut hasher = DefaultHasher::new();
        self.street.hash(hasher);
        self.k().hash(hasher);
        for centroid in self.centroids.iter() {
            for density in centroid.densities() {
                density.to_bits().hash(hasher);
            }
        }
        hasher.finish()
    }

    pub fn path(dir: &Path, street: Street) -> PathBuf {
        dir.join(format!("{}.centroids", street))
    }

    /// write-to-temp then atomic rename
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path(dir, self.street);
        let temp = path.with_extension("centroids.tmp");
        let ref mut writer = BufWriter::new(File::create(&temp)?);
        std::io::Write::write_all(writer, MAGIC)?;
        writer.write_u32::<BE>(VERSION)?;
        writer.write_u8(u8::from(self.street))?;
        writer.write_u32::<BE>(self.k() as u32)?;
        writer.write_u32::<BE>(crate::HISTOGRAM_BIN_COUNT as u32)?;
        for centroid in self.centroids.iter() {
            for density in centroid.densities() {
                writer.write_f32::<BE>(density)?;
            }
        }
        std::io::Write::flush(writer)?;
        std::fs::rename(temp, path)?;
        log::info!("saved {} centroid table", self.street);
        Ok(())
    }

    pub fn load(dir: &Path, street: Street) -> Result<Self> {
        let path = Self::path(dir, street);
        let file = File::open(&path).map_err(|_| Error::Abstraction(street))?;
        let mut reader = BufReader::new(file);
        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::Artifact(format!("bad magic in {}", path.display())));
        }
        let version = reader.read_u32::<BE>()?;
        if version != VERSION {
            return Err(Error::Artifact(format!("centroid version {}", version)));
        }
        let found = Street::from(reader.read_u8()?);
        if found != street {
            return Err(Error::Artifact(format!("{} table in {}", found, path.display())));
        }
        let k = reader.read_u32::<BE>()? as usize;
        let bins = reader.read_u32::<BE>()? as usize;
        if bins != crate::HISTOGRAM_BIN_COUNT {
            return Err(Error::Artifact(format!("{} histogram bins", bins)));
        }
        let centroids = (0..k)
            .map(|_| {
                let mut densities = [0f32; crate::HISTOGRAM_BIN_COUNT];
                for density in densities.iter_mut() {
                    *density = reader.read_f32::<BE>()?;
                }
                Ok(Histogram::from(densities))
            })
            .collect::<Result<Vec<Histogram>>>()?;
        Ok(Self::new(street, centroids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> Lookup {
        let centroids = (0..10)
            .map(|i| {
                (0..16).fold(Histogram::default(), |h, _| h.witness(i as f64 / 10.))
            })
            .collect();
        Lookup::new(Street::Rive, centroids)
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = std::env::temp_dir().join("headsup-lookup-test");
        std::fs::create_dir_all(&dir).unwrap();
        let save = lookup();
        save.save(&dir).unwrap();
        let load = Lookup::load(&dir, Street::Rive).unwrap();
        std::fs::remove_file(Lookup::path(&dir, Street::Rive)).unwrap();
        assert_eq!(save.k(), load.k());
        assert_eq!(save.checksum(), load.checksum());
    }

    #[test]
    fn missing_table_is_abstraction_miss() {
        let dir = std::env::temp_dir().join("headsup-lookup-missing");
        std::fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            Lookup::load(&dir, Street::Flop),
            Err(Error::Abstraction(Street::Flop))
        ));
    }

    #[test]
    fn assigns_deterministically() {
        let lookup = lookup();
        let observation = Observation::from(Street::Rive);
        assert_eq!(
            lookup.abstraction(&observation),
            lookup.abstraction(&observation)
        );
    }
}
