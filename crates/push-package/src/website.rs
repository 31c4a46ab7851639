//! Website parameters for the push package.
//!
//! The website parameters are a flat JSON object of publisher-supplied
//! metadata. They are serialized verbatim into the `website.json` entry of
//! the package; only the presence of the required keys is checked, values
//! pass through unmodified.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::io::Read;

/// Archive-relative path of the serialized website parameters.
pub const WEBSITE_JSON: &str = "website.json";

/// Keys that must be present in the website parameters.
pub const REQUIRED_WEBSITE_PARAMS: [&str; 6] = [
    "websiteName",
    "websitePushID",
    "allowedDomains",
    "urlFormatString",
    "authenticationToken",
    "webServiceURL",
];

/// Publisher-supplied website metadata.
///
/// Wraps a string-keyed JSON object. Keys are canonical strings at this
/// boundary; extra keys beyond the required set are allowed and serialized
/// unchanged.
///
/// # Examples
///
/// ```
/// use push_package::WebsiteParams;
/// use serde_json::json;
///
/// let params = WebsiteParams::from_value(json!({
///     "websiteName": "Example",
///     "websitePushID": "web.com.example",
///     "allowedDomains": ["https://example.com"],
///     "urlFormatString": "https://example.com/%@",
///     "authenticationToken": "19f8d7a6e9fb0a7e8d6c",
///     "webServiceURL": "https://push.example.com",
/// }))?;
/// assert!(params.validate().is_ok());
/// # Ok::<(), push_package::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WebsiteParams(Map<String, Value>);

impl WebsiteParams {
    /// Create website parameters from a JSON object map.
    pub fn new(params: Map<String, Value>) -> Self {
        Self(params)
    }

    /// Create website parameters from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(Error::InvalidParameter(
                REQUIRED_WEBSITE_PARAMS.iter().map(|k| k.to_string()).collect(),
            )),
        }
    }

    /// Read website parameters from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is not valid JSON, or
    /// [`Error::InvalidParameter`] if it is not a JSON object.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Required keys not present in the parameters.
    pub fn missing_keys(&self) -> Vec<String> {
        REQUIRED_WEBSITE_PARAMS
            .iter()
            .filter(|key| !self.0.contains_key(**key))
            .map(|key| key.to_string())
            .collect()
    }

    /// Check that every required key is present.
    ///
    /// Extra keys are allowed and pass through to the package unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] listing the missing keys.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_keys();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParameter(missing))
        }
    }

    /// Serialize the parameters to the exact bytes staged as `website.json`.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    /// Access the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for WebsiteParams {
    fn from(params: Map<String, Value>) -> Self {
        Self::new(params)
    }
}
