use super::histogram::Histogram;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;

/// plain Lloyd's algorithm over equity histograms.
///
/// at our cluster counts (k <= 50) the accelerated variants buy
/// nothing, so we keep the loop simple: assign in parallel, then
/// recompute means. empty clusters are reseeded from a random point.
pub struct KMeans {
    k: usize,
    t: usize,
}

impl KMeans {
    pub fn new(k: usize, t: usize) -> Self {
        assert!(k > 0);
        Self { k, t }
    }

    pub fn cluster(&self, points: &[Histogram], rng: &mut SmallRng) -> Vec<Histogram> {
        assert!(points.len() >= self.k, "more clusters than points");
        let mut centers = points
            .choose_multiple(rng, self.k)
            .cloned()
            .collect::<Vec<Histogram>>();
        for _ in 0..self.t {
            let assignments = points
                .par_iter()
                .map(|p| Self::nearest(&centers, p))
                .collect::<Vec<usize>>();
            centers = (0..self.k)
                .map(|cluster| {
                    let members = points
                        .iter()
                        .zip(assignments.iter())
                        .filter(|(_, a)| **a == cluster)
                        .map(|(p, _)| p)
                        .collect::<Vec<_>>();
                    if members.is_empty() {
                        points.choose(rng).cloned().expect("non-empty points")
                    } else {
                        Histogram::mean(members.into_iter())
                    }
                })
                .collect();
        }
        centers
    }

    /// index of the closest center under the histogram metric
    pub fn nearest(centers: &[Histogram], point: &Histogram) -> usize {
        centers
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.distance(point)))
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).expect("finite distance"))
            .map(|(i, _)| i)
            .expect("non-empty centers")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn blob(equity: f64, n: usize) -> Vec<Histogram> {
        (0..n)
            .map(|i| {
                (0..16).fold(Histogram::default(), |h, j| {
                    h.witness(equity + ((i + j) % 3) as f64 * 0.01)
                })
            })
            .collect()
    }

    #[test]
    fn separates_clear_blobs() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut points = blob(0.1, 20);
        points.extend(blob(0.9, 20));
        let centers = KMeans::new(2, 16).cluster(&points, &mut rng);
        let lo = KMeans::nearest(&centers, &points[0]);
        let hi = KMeans::nearest(&centers, &points[39]);
        assert_ne!(lo, hi);
        assert!(points[0..20]
            .iter()
            .all(|p| KMeans::nearest(&centers, p) == lo));
        assert!(points[20..40]
            .iter()
            .all(|p| KMeans::nearest(&centers, p) == hi));
    }
}
