//! Stable hashing helpers for generated row sets.
//!
//! A fingerprint identifies the exact sequence of rows a data set produced,
//! so two runs can be compared without keeping the rows around.

use blake3::Hasher;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Incremental hasher fed one serializable item at a time (via JSON).
///
/// Each item is length-prefixed so `["ab"], ["c"]` and `["a"], ["bc"]`
/// hash differently.
#[derive(Default)]
pub struct StreamHasher {
    inner: Hasher,
    items: u64,
}

impl StreamHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<T: Serialize>(&mut self, item: &T) -> Result<(), crate::error::Error> {
        let bytes = serde_json::to_vec(item)?;
        self.inner.update(&(bytes.len() as u64).to_le_bytes());
        self.inner.update(&bytes);
        self.items += 1;
        Ok(())
    }

    pub fn finish(self) -> Hash256 {
        let mut inner = self.inner;
        inner.update(&self.items.to_le_bytes());
        Hash256(inner.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_all(items: &[&[&str]]) -> Hash256 {
        let mut h = StreamHasher::new();
        for item in items {
            h.update(item).expect("update");
        }
        h.finish()
    }

    #[test]
    fn item_boundaries_change_the_hash() {
        assert_ne!(hash_all(&[&["ab"], &["c"]]), hash_all(&[&["a"], &["bc"]]));
        assert_ne!(hash_all(&[&["a"]]), hash_all(&[&["a"], &[]]));
        assert_eq!(hash_all(&[&["a"], &["b"]]), hash_all(&[&["a"], &["b"]]));
        assert_eq!(hash_all(&[]).to_hex().len(), 64);
    }
}
