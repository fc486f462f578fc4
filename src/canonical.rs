//! Stable fingerprints for chains and policies.
//!
//! A value is hashed through its JSON encoding, streamed straight into an
//! xxh64 state. Hashed types only hold ordered collections, so equal values
//! always produce the same byte stream.

use std::io;

use serde::Serialize;
use xxhash_rust::xxh64::Xxh64;

/// Bytes fed to the hasher for `value`.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// `io::Write` sink that folds everything written into an xxh64 state.
struct HashSink(Xxh64);

impl io::Write for HashSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// xxh64 of the JSON encoding of `value`.
///
/// # Panics
///
/// If `value` cannot be encoded as JSON. Every chain and policy type can.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    let mut sink = HashSink(Xxh64::new(0));
    serde_json::to_writer(&mut sink, value).expect("chain and policy types always encode as JSON");
    sink.0.digest()
}

/// [`canonical_hash`] as 16 lowercase hex digits.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use xxhash_rust::xxh64::xxh64;

    #[test]
    fn test_streamed_hash_matches_buffered_bytes() {
        let modules: BTreeSet<&str> = ["b.c", "a", "b"].into_iter().collect();
        let bytes = to_canonical_bytes(&modules).unwrap();
        assert_eq!(bytes, br#"["a","b","b.c"]"#);
        assert_eq!(canonical_hash(&modules), xxh64(&bytes, 0));
    }

    #[test]
    fn test_hex_width() {
        assert_eq!(canonical_hash_hex(&"a.b").len(), 16);
    }

    #[test]
    fn test_chain_order_matters() {
        assert_ne!(
            canonical_hash(&vec!["a", "b"]),
            canonical_hash(&vec!["b", "a"])
        );
    }
}
