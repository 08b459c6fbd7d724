use ahash::AHashMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::minhash::MAX_HASH;
use crate::DocIndex;

/// Candidate buckets produced by banding a batch of signatures.
///
/// A bucket is keyed by the band index together with the band's exact
/// coordinate values; two documents land in the same bucket only when a
/// whole band of their signatures agrees coordinate for coordinate.
/// Buckets are rebuilt for every run.
pub struct BandBuckets {
    buckets: AHashMap<(usize, Vec<u64>), SmallVec<[DocIndex; 4]>>,
    band_width: usize,
}

impl BandBuckets {
    pub fn band_width(&self) -> usize {
        self.band_width
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Buckets holding two or more documents, the only ones that can
    /// produce candidate pairs.
    pub fn candidate_groups(&self) -> impl Iterator<Item = &[DocIndex]> {
        self.buckets
            .values()
            .filter(|members| members.len() >= 2)
            .map(|members| members.as_slice())
    }
}

/// Partitions every signature into `num_bands` bands of width
/// `num_hashes / num_bands` and groups document indices sharing an
/// identical band.
///
/// Fails with [`Error::InvalidConfig`] when `num_hashes` is not evenly
/// divisible by `num_bands`, or either is zero, before any signature is
/// touched.
///
/// Documents with an empty n-gram set carry the [`MAX_HASH`] sentinel
/// signature and are not banded at all: they can match nothing, and
/// banding them would spuriously bucket empty documents with each other.
pub fn band_buckets(
    signatures: &[Vec<u64>],
    num_hashes: usize,
    num_bands: usize,
) -> Result<BandBuckets> {
    if num_hashes == 0 {
        return Err(Error::InvalidConfig("num_hashes must be positive".into()));
    }
    if num_bands == 0 {
        return Err(Error::InvalidConfig("num_bands must be positive".into()));
    }
    if num_hashes % num_bands != 0 {
        return Err(Error::InvalidConfig(format!(
            "num_hashes ({}) must be divisible by num_bands ({})",
            num_hashes, num_bands
        )));
    }
    let band_width = num_hashes / num_bands;

    let mut buckets: AHashMap<(usize, Vec<u64>), SmallVec<[DocIndex; 4]>> = AHashMap::new();
    for (doc, signature) in signatures.iter().enumerate() {
        debug_assert_eq!(signature.len(), num_hashes);
        // Sentinel coordinates only occur together, so the first one
        // identifies an empty document.
        if signature.first() == Some(&MAX_HASH) {
            continue;
        }
        for (band_index, band) in signature.chunks_exact(band_width).enumerate() {
            buckets
                .entry((band_index, band.to_vec()))
                .or_insert_with(|| SmallVec::with_capacity(2))
                .push(doc as DocIndex);
        }
    }
    Ok(BandBuckets {
        buckets,
        band_width,
    })
}
