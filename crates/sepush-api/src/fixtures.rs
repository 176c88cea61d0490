//! Offline fixture loader.
//!
//! Serves static JSON documents in place of live calls so integrations can be
//! exercised without spending token quota. The data is fixed and does not
//! reflect the real schedule.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::endpoint::Endpoint;
use crate::error::{RequestError, Result, decode};

/// Documents compiled into the library.
const EMBEDDED: [(&str, &str); 6] = [
    ("status.json", include_str!("../resources/offline/status.json")),
    (
        "areaInformation.json",
        include_str!("../resources/offline/areaInformation.json"),
    ),
    (
        "areasNearby.json",
        include_str!("../resources/offline/areasNearby.json"),
    ),
    (
        "areasSearch.json",
        include_str!("../resources/offline/areasSearch.json"),
    ),
    (
        "topicsNearby.json",
        include_str!("../resources/offline/topicsNearby.json"),
    ),
    (
        "checkAllowance.json",
        include_str!("../resources/offline/checkAllowance.json"),
    ),
];

/// Where offline documents come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FixtureSource {
    /// Documents bundled with the library.
    #[default]
    Embedded,
    /// A directory holding files named like the bundled documents.
    Directory(PathBuf),
}

/// Decodes offline documents for each endpoint.
#[derive(Debug, Clone, Default)]
pub struct FixtureLoader {
    source: FixtureSource,
}

impl FixtureLoader {
    /// Creates a loader reading from `source`.
    #[must_use]
    pub const fn new(source: FixtureSource) -> Self {
        Self { source }
    }

    /// Document source.
    #[must_use]
    pub const fn source(&self) -> &FixtureSource {
        &self.source
    }

    /// Loads and decodes the document for `endpoint`.
    ///
    /// # Errors
    ///
    /// - [`RequestError::BundleNotFound`] if the document does not exist.
    /// - [`RequestError::Decode`] if it exists but cannot be read.
    /// - A decode variant of [`RequestError`] if it is malformed.
    #[instrument(skip_all, fields(endpoint = endpoint.name()))]
    pub async fn load<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let name = endpoint.fixture_name();
        let body = self.read(name).await?;
        tracing::debug!(fixture = name, body_len = body.len(), "Serving offline fixture");
        decode(name, &body)
    }

    async fn read(&self, name: &str) -> Result<Cow<'static, [u8]>> {
        match &self.source {
            FixtureSource::Embedded => embedded(name)
                .map(|body| Cow::Borrowed(body.as_bytes()))
                .ok_or_else(|| RequestError::BundleNotFound(String::from(name))),
            FixtureSource::Directory(dir) => {
                let path = dir.join(name);
                tokio::fs::read(&path)
                    .await
                    .map(Cow::Owned)
                    .map_err(|e| match e.kind() {
                        ErrorKind::NotFound => {
                            RequestError::BundleNotFound(path.display().to_string())
                        }
                        _ => RequestError::Decode {
                            source_name: String::from(name),
                            reason: e.to_string(),
                        },
                    })
            }
        }
    }
}

/// Looks up a bundled document by file name.
fn embedded(name: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, body)| *body)
}
