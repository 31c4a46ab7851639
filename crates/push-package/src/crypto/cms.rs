//! Detached CMS signature generation.
//!
//! Uses the cryptographic-message-syntax crate to produce a binary DER
//! `SignedData` structure over the manifest bytes. The content is external
//! (detached): a verifier must supply the manifest bytes separately.

use crate::crypto::SigningCredentials;
use crate::{Error, Result};
use cryptographic_message_syntax::{SignedDataBuilder, SignerBuilder};

/// Generate a detached CMS signature over `data`.
///
/// The signer's certificate is always embedded in the signature's
/// certificate set; each intermediate carried by the credentials is added
/// as an additional certificate so a verifier can build the chain. With no
/// intermediates exactly one certificate appears.
///
/// Signature bytes are not required to be identical across runs; verifying
/// the result against the same `data` and certificate always succeeds.
///
/// # Errors
///
/// Returns [`Error::Signing`] if the CMS structure cannot be built.
pub fn sign_detached(data: &[u8], credentials: &SigningCredentials) -> Result<Vec<u8>> {
    let signer = SignerBuilder::new(&credentials.signing_key, credentials.certificate.clone());

    let mut builder = SignedDataBuilder::default()
        .content_external(data.to_vec())
        .signer(signer);

    for cert in &credentials.intermediates {
        builder = builder.certificate(cert.clone());
    }

    builder
        .build_der()
        .map_err(|e| Error::Signing(format!("Failed to build CMS signature: {}", e)))
}
