/*!
This library removes duplicated content from large batches of text files.
It implements two cooperating subsystems:

* exact line deduplication: every line whose content fingerprint occurs
  more than once anywhere in the batch is dropped from every file
* near-duplicate document deduplication: [MinHash](https://en.wikipedia.org/wiki/MinHash)
  signatures, banded locality sensitive hashing and union-find clustering
  select one representative per cluster of similar documents

Both operate on a fixed input batch and write one output file per surviving
input into an output directory.

## Example

 ```
 use chaff::minhash::{compute_minhash_similarity, MinHasher64};
 use chaff::text::{normalize, word_ngrams};

 let left = word_ngrams(&normalize("the quick brown fox jumps over the lazy dog"), 2);
 let right = word_ngrams(&normalize("the quick brown fox jumped over the lazy dog"), 2);

 let minhasher = MinHasher64::new(128);
 let sig_left = minhasher.create_signature(left.iter());
 let sig_right = minhasher.create_signature(right.iter());

 let estimate = compute_minhash_similarity(&sig_left, &sig_right);
 assert!(estimate > 0.2 && estimate < 0.95);
 ```

## References
[[1] Chapter 3, Mining of Massive Datasets](http://www.mmds.org)

[[2] On the resemblance and containment of documents](https://ieeexplore.ieee.org/document/666900)

 */

pub mod clustering;
pub mod error;
pub mod exact;
pub mod fuzzy;
pub mod io;
pub mod minhash;
pub mod text;

pub use self::error::{Error, Result};

/// Stable position of a document in the input batch.
pub type DocIndex = u32;
