mod union_find;

pub use self::union_find::UnionFind;

use ahash::AHashMap;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::minhash::{compute_minhash_similarity, BandBuckets};
use crate::DocIndex;

/// Verifies every candidate pair and groups documents into clusters.
///
/// Within each bucket of two or more documents, all pairs are compared by
/// full-signature coordinate agreement; pairs strictly above `threshold`
/// are unioned. A pair sharing several bands is verified once per band;
/// the repeated unions are no-ops, and skipping them would cost a
/// bookkeeping set larger than the saved comparisons.
///
/// Returns a partition of `0..signatures.len()`: every document appears in
/// exactly one cluster, singletons included. Clusters are ordered by their
/// lowest member index, members ascend within each cluster, so the result
/// does not depend on bucket iteration order.
pub fn cluster_candidates(
    signatures: &[Vec<u64>],
    buckets: &BandBuckets,
    threshold: f64,
) -> Vec<Vec<DocIndex>> {
    let mut forest = UnionFind::new(signatures.len());
    for group in buckets.candidate_groups() {
        for (a, b) in group.iter().copied().tuple_combinations() {
            let estimate =
                compute_minhash_similarity(&signatures[a as usize], &signatures[b as usize]);
            if estimate > threshold {
                forest.union(a, b);
            }
        }
    }
    collect_clusters(&mut forest)
}

/// Groups every index by its root, in first-member order.
pub fn collect_clusters(forest: &mut UnionFind) -> Vec<Vec<DocIndex>> {
    let mut cluster_of_root: AHashMap<DocIndex, usize> = AHashMap::new();
    let mut clusters: Vec<Vec<DocIndex>> = Vec::new();
    for index in 0..forest.len() as DocIndex {
        let root = forest.find(index);
        let slot = *cluster_of_root.entry(root).or_insert_with(|| {
            clusters.push(Vec::new());
            clusters.len() - 1
        });
        clusters[slot].push(index);
    }
    clusters
}

/// Picks one document per cluster, uniformly at random.
///
/// A single rng seeded once per run draws the choices; clusters are
/// consumed in their given order, so an identical batch with an identical
/// seed selects identical survivors.
pub fn select_representatives(clusters: &[Vec<DocIndex>], seed: u64) -> Vec<DocIndex> {
    let mut rng = StdRng::seed_from_u64(seed);
    clusters
        .iter()
        .filter_map(|cluster| cluster.choose(&mut rng).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{cluster_candidates, collect_clusters, select_representatives, UnionFind};
    use crate::minhash::{band_buckets, MinHasher64};
    use crate::text::word_ngrams;
    use crate::DocIndex;

    fn signatures_for(texts: &[&str]) -> Vec<Vec<u64>> {
        let min_hasher = MinHasher64::new(64);
        texts
            .iter()
            .map(|text| min_hasher.create_signature(word_ngrams(text, 2).iter()))
            .collect()
    }

    #[test]
    fn test_clusters_form_a_partition() {
        let signatures = signatures_for(&[
            "one two three four five six",
            "one two three four five six",
            "completely unrelated text goes right here",
            "",
        ]);
        let buckets = band_buckets(&signatures, 64, 16).unwrap();
        let clusters = cluster_candidates(&signatures, &buckets, 0.8);

        let mut seen: Vec<DocIndex> = clusters.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.contains(&vec![0, 1]));
    }

    #[test]
    fn test_identical_documents_cluster() {
        let signatures = signatures_for(&[
            "the cat sat on the mat today",
            "the cat sat on the mat today",
        ]);
        let buckets = band_buckets(&signatures, 64, 16).unwrap();
        let clusters = cluster_candidates(&signatures, &buckets, 0.99);
        assert_eq!(clusters, vec![vec![0, 1]]);
    }

    #[test]
    fn test_empty_documents_stay_singletons() {
        let signatures = signatures_for(&["", ""]);
        let buckets = band_buckets(&signatures, 64, 16).unwrap();
        let clusters = cluster_candidates(&signatures, &buckets, 0.5);
        assert_eq!(clusters, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_collect_clusters_orders_by_first_member() {
        let mut forest = UnionFind::new(5);
        forest.union(3, 1);
        forest.union(2, 4);
        let clusters = collect_clusters(&mut forest);
        assert_eq!(clusters, vec![vec![0], vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn test_one_representative_per_cluster() {
        let clusters = vec![vec![0, 1, 2], vec![3], vec![4, 5]];
        let survivors = select_representatives(&clusters, 42);
        assert_eq!(survivors.len(), clusters.len());
        for (survivor, cluster) in survivors.iter().zip(clusters.iter()) {
            assert!(cluster.contains(survivor));
        }
    }

    #[test]
    fn test_selection_is_reproducible() {
        let clusters = vec![vec![0, 1, 2, 3], vec![4, 5], vec![6]];
        assert_eq!(
            select_representatives(&clusters, 7),
            select_representatives(&clusters, 7)
        );
    }
}
