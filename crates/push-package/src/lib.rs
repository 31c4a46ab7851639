pub mod archive;
pub mod crypto;
pub mod error;
pub mod iconset;
pub mod manifest;
pub mod package;
pub mod website;

pub use archive::CompressionLevel;
pub use crypto::SigningCredentials;
pub use error::Error;
pub use manifest::{HashType, Manifest, ManifestEntry};
pub use package::{default_output_path, PushPackage};
pub use website::WebsiteParams;

pub type Result<T> = std::result::Result<T, Error>;
