//! The set of license codes the service knows about.
//!
//! Codes are loaded once at startup from a JSON document of the form
//! `{"licenseCodes": ["...", ...]}` and never change afterwards.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque activation code. No format is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseCode(String);

impl LicenseCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read license codes from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse license codes: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("license code list is empty")]
    Empty,
}

#[derive(Deserialize)]
struct LicenseCodesDocument {
    #[serde(rename = "licenseCodes")]
    license_codes: Vec<LicenseCode>,
}

/// Immutable, non-empty, ordered list of license codes.
///
/// Cloning is cheap; all clones share the same backing slice.
#[derive(Debug, Clone)]
pub struct LicenseCodeSet {
    codes: Arc<[LicenseCode]>,
}

impl LicenseCodeSet {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let document = serde_json::from_str::<LicenseCodesDocument>(raw)?;

        if document.license_codes.is_empty() {
            return Err(StoreError::Empty);
        }

        Ok(Self {
            codes: document.license_codes.into(),
        })
    }

    pub fn all(&self) -> &[LicenseCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    // Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
