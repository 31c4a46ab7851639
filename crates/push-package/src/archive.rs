//! Package archive assembly.
//!
//! Writes the staged working directory into a ZIP archive. Only file
//! entries are added; verifiers do not require directory members.

use crate::{Error, Result};
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ZIP compression level for package assembly.
///
/// Controls the trade-off between compression speed and output file size.
/// Use the provided constants for common use cases, or
/// [`CompressionLevel::new`] for custom levels.
///
/// # Examples
///
/// ```
/// use push_package::CompressionLevel;
///
/// let fast = CompressionLevel::NONE;        // No compression
/// let balanced = CompressionLevel::DEFAULT; // Level 6
/// let small = CompressionLevel::MAX;        // Maximum compression
///
/// let custom = CompressionLevel::new(3);
/// assert_eq!(custom.level(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// No compression (level 0).
    pub const NONE: CompressionLevel = CompressionLevel(0);

    /// Default compression (level 6).
    pub const DEFAULT: CompressionLevel = CompressionLevel(6);

    /// Maximum compression (level 9).
    pub const MAX: CompressionLevel = CompressionLevel(9);

    /// Creates a compression level from 0-9.
    ///
    /// Values greater than 9 are clamped to 9.
    #[must_use]
    pub fn new(level: u32) -> Self {
        CompressionLevel(level.min(9))
    }

    /// Returns the compression level value (0-9).
    #[must_use]
    pub fn level(&self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for CompressionLevel {
    fn from(level: u32) -> Self {
        CompressionLevel::new(level)
    }
}

/// Write every file under `staging_dir` into a ZIP archive on `writer`.
///
/// Entry names are the paths relative to `staging_dir` with `/` separators.
/// Entries are added in sorted traversal order so the archive layout is
/// stable across builds. Directories are not added as members.
///
/// Returns the writer after the central directory has been flushed.
pub fn write_archive<W: Write + Seek>(
    staging_dir: &Path,
    writer: W,
    compression_level: CompressionLevel,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);

    let options = if compression_level.level() == 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level.level() as i64))
    };

    for entry in WalkDir::new(staging_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            Error::Io(std::io::Error::other(format!(
                "Failed to walk staging directory: {}",
                e
            )))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = entry.path().strip_prefix(staging_dir).map_err(|_| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Failed to compute relative path",
            ))
        })?;

        let entry_name = relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        zip.start_file(entry_name, options).map_err(Error::Zip)?;
        zip.write_all(&fs::read(entry.path())?)?;
    }

    zip.finish().map_err(Error::Zip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Cursor, Read};
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn stage_tree(dir: &Path) {
        fs::write(dir.join("website.json"), b"{}").unwrap();
        fs::create_dir(dir.join("icon.iconset")).unwrap();
        fs::write(dir.join("icon.iconset").join("icon_16x16.png"), b"PNG").unwrap();
        fs::write(dir.join("manifest.json"), b"{}").unwrap();
        fs::write(dir.join("signature"), b"\x30\x82").unwrap();
    }

    #[test]
    fn test_write_archive_file_entries_only() {
        let staging = TempDir::new().unwrap();
        stage_tree(staging.path());

        let cursor = write_archive(
            staging.path(),
            Cursor::new(Vec::new()),
            CompressionLevel::DEFAULT,
        )
        .unwrap();

        let mut archive = ZipArchive::new(cursor).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();

        assert_eq!(names.len(), 4);
        assert!(names.contains(&"website.json".to_string()));
        assert!(names.contains(&"icon.iconset/icon_16x16.png".to_string()));
        assert!(names.contains(&"manifest.json".to_string()));
        assert!(names.contains(&"signature".to_string()));
        assert!(names.iter().all(|n| !n.ends_with('/')), "no directory entries");
    }

    #[test]
    fn test_write_archive_preserves_bytes() {
        let staging = TempDir::new().unwrap();
        stage_tree(staging.path());

        let out = TempDir::new().unwrap();
        let path = out.path().join("package.zip");
        write_archive(
            staging.path(),
            File::create(&path).unwrap(),
            CompressionLevel::MAX,
        )
        .unwrap();

        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let mut signature = Vec::new();
        archive
            .by_name("signature")
            .unwrap()
            .read_to_end(&mut signature)
            .unwrap();
        assert_eq!(signature, b"\x30\x82");
    }

    #[test]
    fn test_write_archive_stored() {
        let staging = TempDir::new().unwrap();
        stage_tree(staging.path());

        let cursor = write_archive(
            staging.path(),
            Cursor::new(Vec::new()),
            CompressionLevel::NONE,
        )
        .unwrap();

        let archive = ZipArchive::new(cursor).unwrap();
        assert_eq!(archive.len(), 4);
    }

    #[test]
    fn test_compression_level() {
        assert_eq!(CompressionLevel::NONE.level(), 0);
        assert_eq!(CompressionLevel::DEFAULT.level(), 6);
        assert_eq!(CompressionLevel::MAX.level(), 9);
        assert_eq!(CompressionLevel::new(15).level(), 9); // Clamped
        assert_eq!(CompressionLevel::from(5).level(), 5);
    }
}
