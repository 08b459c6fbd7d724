use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use rayon::prelude::*;

use crate::clustering::{cluster_candidates, select_representatives};
use crate::error::{Error, Result};
use crate::io;
use crate::minhash::{band_buckets, MinHasher64, SipHasher24BuildHasher};
use crate::text::{normalize, word_ngrams};

/// Parameters of a near-duplicate dedup run.
#[derive(Debug, Clone)]
pub struct FuzzyConfig {
    /// Number of hash functions; the signature length.
    pub num_hashes: usize,
    /// Number of LSH bands; must divide `num_hashes` evenly.
    pub num_bands: usize,
    /// Word n-gram size.
    pub ngram_size: usize,
    /// Estimated similarity above which a pair is merged, in [0, 1].
    pub jaccard_threshold: f64,
    /// Seed for representative selection.
    pub seed: u64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        FuzzyConfig {
            num_hashes: 128,
            num_bands: 16,
            ngram_size: 4,
            jaccard_threshold: 0.8,
            seed: 42,
        }
    }
}

impl FuzzyConfig {
    /// Validates before any input is read; a bad combination never starts
    /// a run.
    pub fn validate(&self) -> Result<()> {
        if self.num_hashes == 0 {
            return Err(Error::InvalidConfig("num_hashes must be positive".into()));
        }
        if self.num_bands == 0 {
            return Err(Error::InvalidConfig("num_bands must be positive".into()));
        }
        if self.num_hashes % self.num_bands != 0 {
            return Err(Error::InvalidConfig(format!(
                "num_hashes ({}) must be divisible by num_bands ({})",
                self.num_hashes, self.num_bands
            )));
        }
        if self.ngram_size == 0 {
            return Err(Error::InvalidConfig("ngram_size must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.jaccard_threshold) {
            return Err(Error::InvalidConfig(format!(
                "jaccard_threshold ({}) must be within [0, 1]",
                self.jaccard_threshold
            )));
        }
        Ok(())
    }

    pub fn band_width(&self) -> usize {
        self.num_hashes / self.num_bands
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzyStats {
    /// Readable input documents.
    pub documents: usize,
    pub clusters: usize,
    /// Documents dropped as non-representatives.
    pub duplicates_dropped: usize,
}

/// Keeps one representative per cluster of near-duplicate documents.
///
/// Missing inputs are skipped; the surviving inputs form the batch, in
/// their given order. Each document is normalized, reduced to its word
/// n-gram set and minhashed in parallel, then banded, verified, clustered
/// and thinned to one seeded-random representative per cluster. Survivors
/// are written to `output_dir` with their original content, not the
/// normalized form; non-representatives produce no output file.
pub fn dedup_fuzzy(
    paths: &[PathBuf],
    config: &FuzzyConfig,
    output_dir: &Path,
) -> Result<FuzzyStats> {
    config.validate()?;
    io::ensure_output_dir(output_dir)?;

    let documents: Vec<(&PathBuf, String)> = paths
        .iter()
        .filter_map(|path| io::read_to_string_lossy(path).map(|text| (path, text)))
        .collect();

    let ngram_sets: Vec<AHashSet<String>> = documents
        .par_iter()
        .map(|(_, text)| word_ngrams(&normalize(text), config.ngram_size))
        .collect();

    let min_hasher =
        MinHasher64::new_with_hasher(config.num_hashes, SipHasher24BuildHasher::default());
    let signatures = min_hasher.bulk_create_signature(&ngram_sets);
    tracing::info!(
        documents = documents.len(),
        num_hashes = config.num_hashes,
        "computed minhash signatures"
    );

    let buckets = band_buckets(&signatures, config.num_hashes, config.num_bands)?;
    tracing::debug!(
        buckets = buckets.num_buckets(),
        band_width = buckets.band_width(),
        "banded signatures"
    );

    let clusters = cluster_candidates(&signatures, &buckets, config.jaccard_threshold);
    let survivors = select_representatives(&clusters, config.seed);

    for &index in &survivors {
        let (path, text) = &documents[index as usize];
        let out = io::output_path(output_dir, path);
        fs::write(&out, text).map_err(|source| Error::WriteOutput { path: out, source })?;
    }

    let stats = FuzzyStats {
        documents: documents.len(),
        clusters: clusters.len(),
        duplicates_dropped: documents.len() - survivors.len(),
    };
    tracing::info!(
        documents = stats.documents,
        clusters = stats.clusters,
        duplicates_dropped = stats.duplicates_dropped,
        "fuzzy dedup finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::FuzzyConfig;
    use crate::Error;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FuzzyConfig::default().validate().is_ok());
        assert_eq!(FuzzyConfig::default().band_width(), 8);
    }

    #[test]
    fn test_indivisible_hashes_rejected() {
        let config = FuzzyConfig {
            num_hashes: 100,
            num_bands: 7,
            ..FuzzyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_parameters_rejected() {
        for config in [
            FuzzyConfig {
                num_hashes: 0,
                ..FuzzyConfig::default()
            },
            FuzzyConfig {
                num_bands: 0,
                ..FuzzyConfig::default()
            },
            FuzzyConfig {
                ngram_size: 0,
                ..FuzzyConfig::default()
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = FuzzyConfig {
            jaccard_threshold: 1.5,
            ..FuzzyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig(_))
        ));
    }
}
