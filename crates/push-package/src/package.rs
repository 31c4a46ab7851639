//! Push package builder API.
//!
//! Ties the pipeline together: validate inputs, stage payloads in a scoped
//! working directory, digest them into the manifest, sign the manifest
//! bytes, and assemble the archive atomically at the destination.

use crate::archive::{self, CompressionLevel};
use crate::crypto::{cms, SigningCredentials};
use crate::iconset;
use crate::manifest::{HashType, Manifest};
use crate::website::{WebsiteParams, WEBSITE_JSON};
use crate::{Error, Result};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Archive-relative path of the serialized manifest.
pub const MANIFEST_JSON: &str = "manifest.json";

/// Archive-relative path of the detached signature. No extension.
pub const SIGNATURE_FILE: &str = "signature";

/// Destination used by [`PushPackage::save`] when no path is given.
pub fn default_output_path() -> PathBuf {
    env::temp_dir().join("pushPackage.zip")
}

/// Push package builder.
///
/// # Example
///
/// ```no_run
/// use push_package::{PushPackage, SigningCredentials, WebsiteParams};
/// use std::fs::File;
///
/// let params = WebsiteParams::from_reader(File::open("website.json")?)?;
/// let credentials = SigningCredentials::from_path("credentials.pem", None)?;
///
/// let file = PushPackage::new()
///     .website_params(params)
///     .iconset("./icons")
///     .credentials(credentials)
///     .save_to("pushPackage.zip")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PushPackage {
    website_params: Option<WebsiteParams>,
    iconset_path: Option<PathBuf>,
    credentials: Option<SigningCredentials>,
    hash_type: HashType,
    compression_level: CompressionLevel,
}

impl PushPackage {
    /// Create a new push package builder.
    pub fn new() -> Self {
        Self {
            website_params: None,
            iconset_path: None,
            credentials: None,
            hash_type: HashType::default(),
            compression_level: CompressionLevel::DEFAULT,
        }
    }

    /// Set the website parameters serialized into `website.json`.
    pub fn website_params(mut self, params: impl Into<WebsiteParams>) -> Self {
        self.website_params = Some(params.into());
        self
    }

    /// Set the directory holding the six required icon files.
    pub fn iconset(mut self, path: impl AsRef<Path>) -> Self {
        self.iconset_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the signing credentials.
    ///
    /// Use [`SigningCredentials::from_path`], [`from_reader`](SigningCredentials::from_reader)
    /// or [`from_bytes`](SigningCredentials::from_bytes) to load them from a
    /// PEM bundle or PKCS#12 container.
    pub fn credentials(mut self, credentials: SigningCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the manifest digest algorithm. Defaults to SHA-512.
    pub fn hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }

    /// Set ZIP compression level for the output archive (0-9).
    ///
    /// 0 = no compression (fastest), 9 = maximum compression (smallest).
    /// Default is 6 (balanced).
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = CompressionLevel::new(level);
        self
    }

    /// Validate the builder configuration before any staging work.
    ///
    /// Checks run cheapest first: website parameters (no I/O), credential
    /// presence (no I/O), then icon file existence.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if required website keys are missing
    /// - [`Error::MissingCredentials`] if no credentials were set
    /// - [`Error::InvalidIconset`] if required icon files are absent
    pub fn validate(&self) -> Result<()> {
        match &self.website_params {
            Some(params) => params.validate()?,
            None => {
                return Err(Error::InvalidParameter(
                    crate::website::REQUIRED_WEBSITE_PARAMS
                        .iter()
                        .map(|k| k.to_string())
                        .collect(),
                ));
            }
        }

        if self.credentials.is_none() {
            return Err(Error::MissingCredentials(
                "No signing credentials configured".into(),
            ));
        }

        match &self.iconset_path {
            Some(path) => iconset::validate(path)?,
            None => {
                return Err(Error::InvalidIconset(
                    iconset::REQUIRED_ICONSET_FILES
                        .iter()
                        .map(|n| n.to_string())
                        .collect(),
                ));
            }
        }

        Ok(())
    }

    /// Build the package at the default temporary destination.
    ///
    /// Equivalent to `save_to(default_output_path())`.
    pub fn save(&self) -> Result<File> {
        self.save_to(default_output_path())
    }

    /// Build the package at `output_path`, replacing any existing file.
    ///
    /// All intermediate work happens in a uniquely-named temporary
    /// directory that is removed on every exit path. The archive is
    /// written beside the destination and moved into place only after
    /// every stage has succeeded, so a failed build never leaves a
    /// truncated package at `output_path`.
    ///
    /// Returns the assembled archive reopened for reading.
    pub fn save_to(&self, output_path: impl AsRef<Path>) -> Result<File> {
        self.validate()?;

        let output_path = output_path.as_ref();

        let website_params = self
            .website_params
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter(vec![]))?;
        let iconset_path = self
            .iconset_path
            .as_ref()
            .ok_or_else(|| Error::InvalidIconset(vec![]))?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| Error::MissingCredentials("No signing credentials configured".into()))?;

        // Working directory lives until the end of this call, including
        // error returns.
        let working_dir = tempfile::Builder::new().prefix("pushPackage").tempdir()?;
        let staging = working_dir.path();

        fs::write(staging.join(WEBSITE_JSON), website_params.to_json_bytes()?)?;
        iconset::stage(iconset_path, staging)?;
        debug!(staging = %staging.display(), "staged website.json and iconset");

        let manifest = Manifest::from_staged(staging, self.hash_type)?;
        let manifest_bytes = manifest.to_bytes()?;
        fs::write(staging.join(MANIFEST_JSON), &manifest_bytes)?;

        let signature = cms::sign_detached(&manifest_bytes, credentials)?;
        fs::write(staging.join(SIGNATURE_FILE), &signature)?;
        debug!(
            manifest_len = manifest_bytes.len(),
            signature_len = signature.len(),
            "signed manifest"
        );

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let destination_dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let staged_archive = tempfile::NamedTempFile::new_in(destination_dir)?;
        let staged_archive = archive::write_archive(staging, staged_archive, self.compression_level)?;
        staged_archive
            .persist(output_path)
            .map_err(|e| Error::Io(e.error))?;
        debug!(output = %output_path.display(), "assembled package");

        Ok(File::open(output_path)?)
    }
}

impl Default for PushPackage {
    fn default() -> Self {
        Self::new()
    }
}
