use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::io;

/// 128-bit content fingerprint, an equality proxy for a line within one
/// batch. No persistence guarantee across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u128);

/// Fingerprints a byte sequence with blake3, truncated to 128 bits.
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let digest = blake3::hash(bytes);
    let head: [u8; 16] = digest.as_bytes()[0..16].try_into().unwrap();
    Fingerprint(u128::from_be_bytes(head))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactStats {
    /// Output files written, one per readable input.
    pub files: usize,
    pub lines_read: u64,
    pub lines_written: u64,
}

/// Pass 1: counts every line fingerprint across the whole batch.
///
/// Files are counted in parallel into per-file maps which reduce into one
/// global map; the reduce is the barrier pass 2 waits on. Missing inputs
/// are skipped. Lines lose one trailing `\n` before hashing.
pub fn count_lines(paths: &[PathBuf]) -> AHashMap<Fingerprint, u64> {
    paths
        .par_iter()
        .filter_map(|path| io::read_to_string_lossy(path))
        .map(|text| {
            let mut counts: AHashMap<Fingerprint, u64> = AHashMap::new();
            for line in text.split_inclusive('\n') {
                let content = line.strip_suffix('\n').unwrap_or(line);
                *counts.entry(fingerprint(content.as_bytes())).or_insert(0) += 1;
            }
            counts
        })
        .reduce(AHashMap::new, |mut acc, counts| {
            for (key, count) in counts {
                *acc.entry(key).or_insert(0) += count;
            }
            acc
        })
}

/// Pass 2: rewrites each input keeping only lines whose global count is
/// exactly one.
///
/// Lines are written verbatim, original terminators included. Every
/// readable input produces an output file even when nothing survives.
pub fn write_unique_lines(
    paths: &[PathBuf],
    counts: &AHashMap<Fingerprint, u64>,
    output_dir: &Path,
) -> Result<ExactStats> {
    io::ensure_output_dir(output_dir)?;
    let per_file: Vec<(u64, u64)> = paths
        .par_iter()
        .filter_map(|path| io::read_to_string_lossy(path).map(|text| (path, text)))
        .map(|(path, text)| {
            let out = io::output_path(output_dir, path);
            write_filtered(&out, &text, counts)
                .map_err(|source| Error::WriteOutput { path: out, source })
        })
        .collect::<Result<_>>()?;

    let mut stats = ExactStats {
        files: per_file.len(),
        ..ExactStats::default()
    };
    for (read, written) in per_file {
        stats.lines_read += read;
        stats.lines_written += written;
    }
    Ok(stats)
}

fn write_filtered(
    out: &Path,
    text: &str,
    counts: &AHashMap<Fingerprint, u64>,
) -> std::io::Result<(u64, u64)> {
    let mut writer = BufWriter::new(File::create(out)?);
    let mut read = 0;
    let mut written = 0;
    for line in text.split_inclusive('\n') {
        read += 1;
        let content = line.strip_suffix('\n').unwrap_or(line);
        if counts.get(&fingerprint(content.as_bytes())) == Some(&1) {
            writer.write_all(line.as_bytes())?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok((read, written))
}

/// Removes every line that occurs more than once anywhere in the batch.
///
/// Counting is global: a line duplicated across two files disappears from
/// both, and a line duplicated within one file loses all its occurrences,
/// not all but one.
pub fn dedup_exact(paths: &[PathBuf], output_dir: &Path) -> Result<ExactStats> {
    let counts = count_lines(paths);
    tracing::info!(
        distinct_lines = counts.len(),
        inputs = paths.len(),
        "counted line fingerprints"
    );
    let stats = write_unique_lines(paths, &counts, output_dir)?;
    tracing::info!(
        files = stats.files,
        lines_read = stats.lines_read,
        lines_written = stats.lines_written,
        "exact dedup finished"
    );
    Ok(stats)
}
