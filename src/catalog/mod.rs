//! Catalog wiring.
//!
//! This module wraps the JSON document under `data/interventions.json` so
//! the filter engine and the shells can load a parsed snapshot and resolve
//! identifiers through ancestor-scoped lookups. Types in `model` mirror the
//! document fields; callers use `CatalogStore` for loading and resolution.

pub mod model;
pub mod store;

pub use model::{
    Catalog, Intervention, LoadError, Pillar, Screener, TestArea, Tier, load_catalog_from_path,
};
pub use store::CatalogStore;
