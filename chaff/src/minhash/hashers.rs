use siphasher::sip::SipHasher24;
use std::hash::BuildHasher;

/// BuildHasher producing keyed SipHasher24 instances. The keys make the
/// base hash reproducible across processes, unlike the std RandomState.
#[derive(Clone, Copy, Debug)]
pub struct SipHasher24BuildHasher {
    key0: u64,
    key1: u64,
}

impl SipHasher24BuildHasher {
    pub fn new(key0: u64, key1: u64) -> Self {
        SipHasher24BuildHasher { key0, key1 }
    }
}

impl Default for SipHasher24BuildHasher {
    fn default() -> Self {
        SipHasher24BuildHasher::new(1, 2)
    }
}

impl BuildHasher for SipHasher24BuildHasher {
    type Hasher = SipHasher24;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        SipHasher24::new_with_keys(self.key0, self.key1)
    }
}

#[cfg(test)]
mod tests {
    use super::SipHasher24BuildHasher;
    use std::hash::{BuildHasher, Hash, Hasher};

    fn hash_once(build: &SipHasher24BuildHasher, value: &str) -> u64 {
        let mut hasher = build.build_hasher();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_same_keys_same_hash() {
        let b1 = SipHasher24BuildHasher::new(1, 2);
        let b2 = SipHasher24BuildHasher::new(1, 2);
        assert_eq!(hash_once(&b1, "ngram"), hash_once(&b2, "ngram"));
    }

    #[test]
    fn test_different_keys_different_hash() {
        let b1 = SipHasher24BuildHasher::new(1, 2);
        let b2 = SipHasher24BuildHasher::new(3, 4);
        assert_ne!(hash_once(&b1, "ngram"), hash_once(&b2, "ngram"));
    }
}
