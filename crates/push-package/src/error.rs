//! Error types for push package construction.
//!
//! This module defines the [`enum@Error`] enum covering all failure cases
//! in package building, including validation, credential parsing,
//! signing, and archive assembly errors.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use thiserror::Error;

/// Error type for push package operations.
///
/// All public functions in this crate return [`crate::Result<T>`], which uses this error type.
/// Match on variants to handle specific failure cases.
///
/// # Examples
///
/// ```no_run
/// use push_package::{Error, PushPackage};
///
/// let result = PushPackage::new().save();
/// match result {
///     Ok(_) => println!("Package written"),
///     Err(Error::MissingCredentials(msg)) => eprintln!("Need credentials: {msg}"),
///     Err(Error::Io(e)) => eprintln!("IO error: {e}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Occurs when reading input files, staging the working directory, or
    /// writing the output archive. A referenced credential or intermediate
    /// certificate path that does not exist surfaces here as
    /// [`std::io::ErrorKind::NotFound`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more required website parameters are missing.
    ///
    /// The contained list holds the missing key names. See
    /// [`crate::website::REQUIRED_WEBSITE_PARAMS`] for the full required set.
    #[error("Missing required website parameters: {0:?}")]
    InvalidParameter(Vec<String>),

    /// One or more required icon files are absent from the iconset directory.
    ///
    /// The contained list holds the missing file names. See
    /// [`crate::iconset::REQUIRED_ICONSET_FILES`] for the full required set.
    #[error("Invalid iconset, missing icons: {0:?}")]
    InvalidIconset(Vec<String>),

    /// Required credentials not configured.
    ///
    /// Package building was attempted without first calling
    /// [`crate::PushPackage::credentials`].
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Invalid or malformed certificate or private key material.
    ///
    /// The provided credential source could not be parsed. See
    /// [`crate::SigningCredentials`] for valid formats.
    #[error("Invalid certificate: {0}")]
    Certificate(String),

    /// Incorrect password for the PKCS#12 container.
    #[error("Invalid password for PKCS#12 container")]
    InvalidPassword,

    /// CMS signature generation failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// ZIP archive operation failed.
    ///
    /// Occurs during package assembly. See [`crate::archive`] module.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization or parsing failed.
    ///
    /// Occurs when serializing website parameters or the manifest.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
