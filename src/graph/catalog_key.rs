// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed catalog keys for named pipeline inputs and outputs.
//!
//! Pipeline nodes exchange data through an external catalog, addressed by
//! string keys. The string contract distinguishes two kinds of entry:
//!
//! * **Datasets** — artifacts produced and consumed inside the pipeline
//!   (`raw_data`, `X_train`, `model`, ...)
//! * **Parameters** — configuration values resolved by the external store,
//!   written with the `params:` prefix (`params:test_size`, ...)
//!
//! Raw strings make that distinction easy to get wrong, so the graph model
//! uses [`CatalogKey`] and only drops back to the string form at the
//! serialization boundary, where the external engine expects the exact
//! prefixed names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// String prefix marking a catalog key as a parameter reference.
pub const PARAMETER_PREFIX: &str = "params:";

/// A typed reference into the external data/parameter catalog.
///
/// # Examples
///
/// ## Parsing the string contract form
/// ```
/// use trellis::graph::CatalogKey;
///
/// let dataset = CatalogKey::from("raw_data");
/// let param = CatalogKey::from("params:test_size");
///
/// assert!(!dataset.is_parameter());
/// assert!(param.is_parameter());
/// assert_eq!(param.name(), "test_size");
/// ```
///
/// ## Round-tripping through `Display`
/// ```
/// use trellis::graph::CatalogKey;
///
/// let key = CatalogKey::parameter("batch_size");
/// assert_eq!(key.to_string(), "params:batch_size");
/// assert_eq!(CatalogKey::from("params:batch_size"), key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    /// A data artifact resolved from the catalog
    Dataset(String),
    /// A configuration value resolved from the parameter store
    Parameter(String),
}

impl CatalogKey {
    /// Create a dataset key.
    pub fn dataset(name: impl Into<String>) -> Self {
        CatalogKey::Dataset(name.into())
    }

    /// Create a parameter key. The name is the bare parameter name,
    /// without the `params:` prefix.
    pub fn parameter(name: impl Into<String>) -> Self {
        CatalogKey::Parameter(name.into())
    }

    /// The bare entry name, without any prefix.
    pub fn name(&self) -> &str {
        match self {
            CatalogKey::Dataset(name) | CatalogKey::Parameter(name) => name,
        }
    }

    /// Whether this key resolves against the parameter store rather than
    /// the dataset catalog. Parameter inputs are always externally
    /// resolvable; dataset inputs must be produced inside the pipeline.
    pub fn is_parameter(&self) -> bool {
        matches!(self, CatalogKey::Parameter(_))
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKey::Dataset(name) => write!(f, "{}", name),
            CatalogKey::Parameter(name) => write!(f, "{}{}", PARAMETER_PREFIX, name),
        }
    }
}

impl From<&str> for CatalogKey {
    fn from(raw: &str) -> Self {
        match raw.strip_prefix(PARAMETER_PREFIX) {
            Some(name) => CatalogKey::Parameter(name.to_string()),
            None => CatalogKey::Dataset(raw.to_string()),
        }
    }
}

impl From<String> for CatalogKey {
    fn from(raw: String) -> Self {
        CatalogKey::from(raw.as_str())
    }
}

impl FromStr for CatalogKey {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(CatalogKey::from(raw))
    }
}

// Serialized as the plain string contract form so an emitted plan carries
// the exact names the external catalog resolves.
impl Serialize for CatalogKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CatalogKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CatalogKey::from(raw))
    }
}
