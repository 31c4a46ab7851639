//! Iconset validation and staging.
//!
//! Every push package carries the same six icon files, two size variants at
//! two resolution scales plus the large variants. Validation only checks that
//! each file exists; image contents are not inspected.

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Archive-relative directory holding the icons.
pub const ICONSET_DIR: &str = "icon.iconset";

/// Icon file names that must exist in the iconset directory.
pub const REQUIRED_ICONSET_FILES: [&str; 6] = [
    "icon_16x16.png",
    "icon_16x16@2x.png",
    "icon_32x32.png",
    "icon_32x32@2x.png",
    "icon_128x128.png",
    "icon_128x128@2x.png",
];

/// Required icon files not present at `iconset_path`.
pub fn missing_icons(iconset_path: &Path) -> Vec<String> {
    REQUIRED_ICONSET_FILES
        .iter()
        .filter(|name| !iconset_path.join(name).is_file())
        .map(|name| name.to_string())
        .collect()
}

/// Check that every required icon file exists at `iconset_path`.
///
/// Extra files in the directory are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidIconset`] listing the missing file names.
pub fn validate(iconset_path: &Path) -> Result<()> {
    let missing = missing_icons(iconset_path);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidIconset(missing))
    }
}

/// Copy the six required icons into `<staging_dir>/icon.iconset/`.
///
/// Only the required files are staged; anything else in the source
/// directory is left behind so the archive holds exactly the entries the
/// manifest covers.
pub(crate) fn stage(iconset_path: &Path, staging_dir: &Path) -> Result<()> {
    let dest = staging_dir.join(ICONSET_DIR);
    fs::create_dir(&dest)?;

    for name in REQUIRED_ICONSET_FILES {
        fs::copy(iconset_path.join(name), dest.join(name))?;
    }

    Ok(())
}
