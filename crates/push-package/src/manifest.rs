//! Digest manifest construction and canonical serialization.
//!
//! The manifest maps every payload path in the archive to a content digest
//! of the exact bytes shipped for that path. Its serialized bytes are what
//! the detached signature covers, so serialization must be byte-stable:
//! entries keep a fixed order (the six icons in declared order, then
//! `website.json`) and the JSON is compact with no incidental whitespace.

use crate::iconset::{ICONSET_DIR, REQUIRED_ICONSET_FILES};
use crate::website::WEBSITE_JSON;
use crate::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha512};
use std::fs;
use std::path::Path;

/// Digest algorithm used for manifest entries.
///
/// Entries are algorithm-tagged (`{"hashType": ..., "hashValue": ...}`) so
/// the algorithm can migrate without format ambiguity. A single manifest
/// never mixes algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashType {
    /// SHA-512, hex-encoded lowercase.
    #[default]
    #[serde(rename = "sha512")]
    Sha512,
}

impl HashType {
    /// Wire name of the algorithm, as serialized into `hashType`.
    pub fn name(&self) -> &'static str {
        match self {
            HashType::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn digest(&self, data: &[u8]) -> String {
        match self {
            HashType::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
        }
    }
}

/// A single manifest entry: algorithm tag plus hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Digest algorithm identifier.
    pub hash_type: HashType,
    /// Lowercase hex digest of the payload bytes.
    pub hash_value: String,
}

/// Ordered mapping from archive-relative payload paths to content digests.
///
/// # Examples
///
/// ```no_run
/// use push_package::{HashType, Manifest};
/// use std::path::Path;
///
/// let manifest = Manifest::from_staged(Path::new("/tmp/staging"), HashType::Sha512)?;
/// let bytes = manifest.to_bytes()?;
/// # Ok::<(), push_package::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, ManifestEntry)>,
}

impl Manifest {
    /// The payload paths covered by every manifest, in serialization order:
    /// the six icons in declared iconset order, then `website.json` last.
    pub fn payload_paths() -> Vec<String> {
        let mut paths: Vec<String> = REQUIRED_ICONSET_FILES
            .iter()
            .map(|name| format!("{ICONSET_DIR}/{name}"))
            .collect();
        paths.push(WEBSITE_JSON.to_string());
        paths
    }

    /// Digest every staged payload under `staging_dir`.
    ///
    /// Digests are computed over the staged on-disk bytes, which are the
    /// exact bytes later written into the archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if a staged payload cannot
    /// be read.
    pub fn from_staged(staging_dir: &Path, hash_type: HashType) -> Result<Self> {
        let entries = Self::payload_paths()
            .into_iter()
            .map(|path| {
                let data = fs::read(staging_dir.join(&path))?;
                let entry = ManifestEntry {
                    hash_type,
                    hash_value: hash_type.digest(&data),
                };
                Ok((path, entry))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// The ordered `(path, entry)` pairs.
    pub fn entries(&self) -> &[(String, ManifestEntry)] {
        &self.entries
    }

    /// Serialize to the canonical manifest bytes.
    ///
    /// These are the bytes written to `manifest.json` and covered by the
    /// detached signature. Identical inputs always produce identical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, entry) in &self.entries {
            map.serialize_entry(path, entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // SHA-512 of the empty input.
    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

    fn stage_payloads(dir: &Path) {
        fs::create_dir(dir.join(ICONSET_DIR)).unwrap();
        for name in REQUIRED_ICONSET_FILES {
            fs::write(dir.join(ICONSET_DIR).join(name), b"PNG_DATA").unwrap();
        }
        fs::write(dir.join(WEBSITE_JSON), b"{}").unwrap();
    }

    #[test]
    fn test_payload_paths_order() {
        let paths = Manifest::payload_paths();
        assert_eq!(paths.len(), 7);
        assert_eq!(paths[0], "icon.iconset/icon_16x16.png");
        assert_eq!(paths[5], "icon.iconset/icon_128x128@2x.png");
        assert_eq!(paths[6], "website.json");
    }

    #[test]
    fn test_digest_empty_input() {
        assert_eq!(HashType::Sha512.digest(b""), EMPTY_SHA512);
    }

    #[test]
    fn test_from_staged_covers_every_payload() {
        let dir = TempDir::new().unwrap();
        stage_payloads(dir.path());

        let manifest = Manifest::from_staged(dir.path(), HashType::Sha512).unwrap();
        assert_eq!(manifest.entries().len(), 7);
        for (path, entry) in manifest.entries() {
            assert_eq!(entry.hash_type, HashType::Sha512);
            assert_eq!(entry.hash_value.len(), 128, "{path} digest length");
        }
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let dir = TempDir::new().unwrap();
        stage_payloads(dir.path());

        let a = Manifest::from_staged(dir.path(), HashType::Sha512).unwrap();
        let b = Manifest::from_staged(dir.path(), HashType::Sha512).unwrap();
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn test_serialization_shape() {
        let dir = TempDir::new().unwrap();
        stage_payloads(dir.path());

        let manifest = Manifest::from_staged(dir.path(), HashType::Sha512).unwrap();
        let bytes = manifest.to_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("{\"icon.iconset/icon_16x16.png\":{\"hashType\":\"sha512\""));
        assert!(text.contains("\"website.json\":{\"hashType\":\"sha512\""));

        // Keys appear in declared order.
        let mut last = 0;
        for path in Manifest::payload_paths() {
            let pos = text.find(&format!("\"{path}\"")).unwrap();
            assert!(pos >= last, "{path} out of order");
            last = pos;
        }
    }

    #[test]
    fn test_entry_round_trips_through_json() {
        let entry = ManifestEntry {
            hash_type: HashType::Sha512,
            hash_value: EMPTY_SHA512.to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            format!("{{\"hashType\":\"sha512\",\"hashValue\":\"{EMPTY_SHA512}\"}}")
        );
        let parsed: ManifestEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_digest_reflects_staged_bytes() {
        let dir = TempDir::new().unwrap();
        stage_payloads(dir.path());
        fs::write(dir.path().join(WEBSITE_JSON), b"").unwrap();

        let manifest = Manifest::from_staged(dir.path(), HashType::Sha512).unwrap();
        let (_, entry) = manifest
            .entries()
            .iter()
            .find(|(path, _)| path == WEBSITE_JSON)
            .unwrap();
        assert_eq!(entry.hash_value, EMPTY_SHA512);
    }
}
