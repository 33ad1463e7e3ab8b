//! Deserializable representation of `data/interventions.json`.
//!
//! The types mirror the catalog document so the store and the shells can
//! reason about the hierarchy without ad-hoc JSON handling. The document is
//! a top-level ordered array of tiers; ordering is meaningful at every level
//! and is preserved as-is. Identifiers are plain tokens, unique only within
//! their immediate parent's child list, so resolution always goes through the
//! scoped lookups on `CatalogStore`, never by bare id across the tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Full interventions catalog as stored on disk.
///
/// Serializes transparently as the tier array so the in-memory shape and the
/// document shape stay identical.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub tiers: Vec<Tier>,
}

/// Top level of the hierarchy (e.g. "Tier 2 — Targeted").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    pub name: String,
    pub screeners: Vec<Screener>,
}

/// Screening instrument available within a tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Screener {
    pub id: String,
    pub name: String,
    #[serde(rename = "testAreas")]
    pub test_areas: Vec<TestArea>,
}

/// Measured skill area within a screener.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestArea {
    pub id: String,
    pub name: String,
    pub pillars: Vec<Pillar>,
}

/// Instructional pillar; its intervention list may legitimately be empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pillar {
    pub id: String,
    pub name: String,
    pub interventions: Vec<Intervention>,
}

/// Leaf record, opaque to the filter machinery; passed through for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    pub name: String,
    pub description: String,
    pub duration: String,
    #[serde(rename = "groupSize")]
    pub group_size: String,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
}

/// Why a catalog document could not be turned into a `Catalog`.
///
/// Loads are all-or-nothing: either the whole document parses or the caller
/// gets one of these and no catalog at all.
#[derive(Debug)]
pub enum LoadError {
    /// The source file could not be read at all.
    Unreachable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The payload was read but does not parse as the catalog shape.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unreachable { path, source } => {
                write!(f, "catalog {} is unreachable: {}", path.display(), source)
            }
            LoadError::Malformed { path, source } => {
                write!(
                    f,
                    "catalog {} is not a valid interventions document: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Unreachable { source, .. } => Some(source),
            LoadError::Malformed { source, .. } => Some(source),
        }
    }
}

/// Read and parse a catalog document from disk.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog, LoadError> {
    let data = fs::read_to_string(path).map_err(|source| LoadError::Unreachable {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog: Catalog = serde_json::from_str(&data).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(catalog)
}
