//! In-memory store for the loaded catalog, with ancestor-scoped lookups.
//!
//! Identifiers are unique only within one parent's child list, so every
//! lookup walks the already-resolved ancestor chain and short-circuits to
//! `None` as soon as a link fails. Nothing here searches the whole tree by a
//! bare id. Resolution is a linear scan of the parent's ordered children;
//! when a document carries duplicate sibling ids the first match in document
//! order wins, undetected.

use crate::catalog::model::{
    Catalog, LoadError, Pillar, Screener, TestArea, Tier, load_catalog_from_path,
};
use std::path::Path;

/// Holds the catalog once loaded; empty (no tiers, no lookups) before then.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalog: Option<Catalog>,
}

impl CatalogStore {
    /// Fresh store with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated from an already-parsed catalog. Used by tests and
    /// callers that obtain the document some other way.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    /// Load the catalog document at `path`, replacing the current contents.
    ///
    /// All-or-nothing: on any failure the store keeps whatever it held
    /// before (nothing, if it was never loaded).
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let catalog = load_catalog_from_path(path)?;
        self.catalog = Some(catalog);
        Ok(())
    }

    /// Whether a catalog has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// All tiers in document order; empty before a successful load.
    pub fn tiers(&self) -> &[Tier] {
        self.catalog
            .as_ref()
            .map(|catalog| catalog.tiers.as_slice())
            .unwrap_or_default()
    }

    /// Resolve a tier by id.
    pub fn find_tier(&self, id: &str) -> Option<&Tier> {
        self.tiers().iter().find(|tier| tier.id == id)
    }

    /// Resolve a screener by id within the given tier.
    pub fn find_screener(&self, tier_id: &str, id: &str) -> Option<&Screener> {
        self.find_tier(tier_id)?
            .screeners
            .iter()
            .find(|screener| screener.id == id)
    }

    /// Resolve a test area by id within the given tier/screener chain.
    pub fn find_test_area(&self, tier_id: &str, screener_id: &str, id: &str) -> Option<&TestArea> {
        self.find_screener(tier_id, screener_id)?
            .test_areas
            .iter()
            .find(|area| area.id == id)
    }

    /// Resolve a pillar by id within the given tier/screener/test-area chain.
    pub fn find_pillar(
        &self,
        tier_id: &str,
        screener_id: &str,
        test_area_id: &str,
        id: &str,
    ) -> Option<&Pillar> {
        self.find_test_area(tier_id, screener_id, test_area_id)?
            .pillars
            .iter()
            .find(|pillar| pillar.id == id)
    }
}
