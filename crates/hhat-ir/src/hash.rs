use std::{fmt, hash::Hash};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::IrError;

const DOMAIN: &str = "hhat:irhash:v0.1|";
const SOURCE_ROOT: &str = "src";

/// Stable identity of a compilation unit.
///
/// The key is the lexically normalized unit path; the uid is the first eight
/// bytes of the BLAKE3 digest of that path, little endian. Two identities are
/// equal iff their uids are equal, which is what the perfect-hash index
/// relies on.
#[derive(Debug, Clone)]
pub struct IrHash {
    key: Utf8PathBuf,
    uid: u64,
}

impl IrHash {
    pub fn new(path: impl AsRef<Utf8Path>) -> Result<Self, IrError> {
        let key = hhat_utils::path::normalize(path.as_ref());

        if key.as_str().is_empty() {
            return Err(IrError::EmptyPath(path.as_ref().to_string()));
        }

        let uid = uid_of(&key);
        Ok(Self { key, uid })
    }

    #[inline]
    pub fn key(&self) -> &Utf8Path {
        &self.key
    }

    #[inline]
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Whether `path` normalizes to this identity's key.
    pub fn matches_path(&self, path: impl AsRef<Utf8Path>) -> bool {
        hhat_utils::path::normalize(path) == self.key
    }
}

fn uid_of(key: &Utf8Path) -> u64 {
    let payload = format!("{DOMAIN}{key}");
    let digest = blake3::hash(payload.as_bytes());

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

impl PartialEq for IrHash {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for IrHash {}

impl Hash for IrHash {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uid.hash(state);
    }
}

impl fmt::Display for IrHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.key.iter().collect::<Vec<_>>();
        let start = parts
            .iter()
            .rposition(|part| *part == SOURCE_ROOT)
            .map_or(0, |idx| idx + 1);

        write!(f, "[{}#{:08}]", parts[start..].join("/"), self.uid % 100_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_normalized_path_same_identity() {
        let a = IrHash::new("src/./x/../a").unwrap();
        let b = IrHash::new("src/a").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.uid(), b.uid());
        assert_eq!(a.key(), Utf8Path::new("src/a"));
    }

    #[test]
    fn different_paths_differ() {
        let a = IrHash::new("src/a").unwrap();
        let b = IrHash::new("src/b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(IrHash::new("."), Err(IrError::EmptyPath(_))));
    }

    #[test]
    fn display_trims_source_root() {
        let hash = IrHash::new("project/src/math/arith").unwrap();
        let shown = hash.to_string();

        assert!(shown.starts_with("[math/arith#"));
        assert!(shown.ends_with(']'));
        assert_eq!(shown.len(), "[math/arith#".len() + 8 + 1);
    }
}
