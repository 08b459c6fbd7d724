use std::hash::{BuildHasher, Hash, Hasher};

use ahash::AHashSet;
use fnv::FnvBuildHasher;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::minhash::MAX_HASH;

const MERSENNE_PRIME_61: u64 = (1 << 61) - 1;

/// Builds minhash signatures of `num_hashes` 64-bit coordinates.
///
/// Each item is hashed once with the base `BuildHasher`, then passed
/// through `num_hashes` random affine permutations modulo a Mersenne
/// prime; coordinate `i` is the minimum permuted value over the whole set.
/// The permutations are drawn from a seeded rng, so two instances built
/// with the same parameters produce identical signatures.
pub struct MinHasher64<B: BuildHasher> {
    build_hasher: B,
    a: Vec<u64>,
    b: Vec<u64>,
    num_hashes: usize,
}

impl MinHasher64<FnvBuildHasher> {
    /// Constructs a `MinHasher64` with a specified number of hash
    /// functions to use.
    /// ```
    /// use chaff::minhash::MinHasher64;
    ///
    /// let min_hasher = MinHasher64::new(128);
    /// assert_eq!(min_hasher.num_hashes(), 128);
    /// ```
    pub fn new(num_hashes: usize) -> Self {
        MinHasher64::new_with_hasher(num_hashes, FnvBuildHasher::default())
    }
}

impl<B: BuildHasher> MinHasher64<B> {
    pub fn new_with_hasher(num_hashes: usize, build_hasher: B) -> Self {
        Self::new_with_hasher_and_seed(num_hashes, build_hasher, 3)
    }

    pub fn new_with_hasher_and_seed(num_hashes: usize, build_hasher: B, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let rand_range1 = Uniform::from(1..MERSENNE_PRIME_61);
        let rand_range2 = Uniform::from(0..MERSENNE_PRIME_61);
        MinHasher64 {
            build_hasher,
            a: (0..num_hashes)
                .map(|_| rand_range1.sample(&mut rng))
                .collect(),
            b: (0..num_hashes)
                .map(|_| rand_range2.sample(&mut rng))
                .collect(),
            num_hashes,
        }
    }

    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Returns the signature of the item set produced by `iter`.
    ///
    /// The signature length is always `num_hashes`. An empty iterator
    /// yields a signature of [`MAX_HASH`] in every coordinate, which never
    /// collides with a coordinate of a non-empty set.
    pub fn create_signature<T, U>(&self, iter: T) -> Vec<u64>
    where
        T: Iterator<Item = U>,
        U: Hash,
    {
        let hashes: Vec<u64> = iter
            .map(|item| {
                let mut hasher = self.build_hasher.build_hasher();
                item.hash(&mut hasher);
                hasher.finish()
            })
            .collect::<Vec<_>>();

        match hashes.len() {
            len if len > 0 => self
                .a
                .iter()
                .zip(self.b.iter())
                .map(|ab| {
                    hashes
                        .iter()
                        .map(|hash| {
                            hash.wrapping_mul(*ab.0).wrapping_add(*ab.1) % MERSENNE_PRIME_61
                        })
                        .min()
                        .unwrap()
                })
                .collect(),
            _ => vec![MAX_HASH; self.num_hashes],
        }
    }

    /// Signature computation is independent per document; the batch fans
    /// out over the rayon pool and results stay index-aligned with the
    /// input.
    pub fn bulk_create_signature<U>(&self, batch: &[AHashSet<U>]) -> Vec<Vec<u64>>
    where
        U: Hash + Sync,
        B: Sync,
    {
        batch
            .par_iter()
            .map(|tokens| self.create_signature(tokens.iter()))
            .collect()
    }
}
