mod banding;
mod hashers;
mod min_hasher;

pub use self::banding::{band_buckets, BandBuckets};
pub use self::hashers::SipHasher24BuildHasher;
pub use self::min_hasher::MinHasher64;

/// Coordinate value filling the signature of a document whose n-gram set is
/// empty. Permuted hashes are reduced modulo a Mersenne prime below 2^61,
/// so this value never occurs in a signature built from a non-empty set.
pub const MAX_HASH: u64 = u64::MAX;

/// Estimates jaccard similarity between two minhash signatures as the
/// fraction of coordinates that agree.
///
/// # Examples
///
/// ```
/// use chaff::minhash::compute_minhash_similarity;
///
/// let m1 = [1, 2, 3, 4, 5, 6];
/// let m2 = [1, 2, 3, 7, 5, 8];
/// assert!((compute_minhash_similarity(&m1, &m2) - 0.666) < 0.01);
/// ```
pub fn compute_minhash_similarity(min_hashes_1: &[u64], min_hashes_2: &[u64]) -> f64 {
    assert_eq!(min_hashes_1.len(), min_hashes_2.len());
    let num_hashes = min_hashes_1.len();
    let matches: u64 = min_hashes_1
        .iter()
        .zip(min_hashes_2.iter())
        .map(|(min_hash_1, min_hash_2)| (min_hash_1 == min_hash_2) as u64)
        .sum();
    (matches as f64) / (num_hashes as f64)
}

/// Calculates the number of bands `b` and band width `r` given the minimum
/// `jaccard_similarity`, the number of hashes `num_hashes`, and a 0.99
/// probability for two sets with similarity above the threshold to share a
/// bucket.
/// For more info see 3.4.2 in <http://infolab.stanford.edu/~ullman/mmds/ch3n.pdf>
///
/// # Examples
///
/// ```
/// use chaff::minhash::calculate_minhash_params;
/// let (b, r) = calculate_minhash_params(0.5, 128);
/// assert_eq!(b, 42);
/// assert_eq!(r, 3);
///
/// let (b, r) = calculate_minhash_params(0.7, 196);
/// assert_eq!(b, 39);
/// assert_eq!(r, 5);
/// ```
pub fn calculate_minhash_params(jaccard_similarity: f64, num_hashes: usize) -> (usize, usize) {
    calculate_b_and_r(jaccard_similarity, num_hashes, 0.99)
}

fn calculate_b_and_r(s: f64, n: usize, p: f64) -> (usize, usize) {
    let proba = |b: f64, r: f64| 1.0 - (1.0 - s.powf(r)).powf(b);
    let mut b = n;
    let mut r = 1;
    while b > 1 {
        let r1 = r + 1;
        let b1 = n / r1;
        if proba(b1 as f64, r1 as f64) > p {
            b = b1;
            r = r1;
        } else {
            break;
        }
    }
    (b, r)
}

#[cfg(test)]
mod tests {
    use super::compute_minhash_similarity;

    #[test]
    fn test_similarity_of_identical_signatures() {
        let m = [7u64, 8, 9, 10];
        assert_eq!(compute_minhash_similarity(&m, &m), 1.0);
    }

    #[test]
    fn test_similarity_of_disjoint_signatures() {
        let m1 = [1u64, 2, 3, 4];
        let m2 = [5u64, 6, 7, 8];
        assert_eq!(compute_minhash_similarity(&m1, &m2), 0.0);
    }
}
