//! Content fingerprints for benchmark and submission files.
//!
//! Digests are BLAKE3 over the raw bytes as received, before any parsing, so two
//! uploads with the same digest are guaranteed to produce the same evaluation.

/// Computes the BLAKE3 digest of `data` as lowercase hex.
#[inline]
pub fn digest_hex(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
