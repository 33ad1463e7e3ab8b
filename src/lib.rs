//! Reference browser for a tiered interventions catalog.
//!
//! The crate exposes the two components the shells are built on: the catalog
//! store (load `data/interventions.json`, resolve identifiers through
//! ancestor-scoped lookups) and the filter engine (the four-level cascading
//! selection that derives option lists and result sets). Rendering and
//! page-fragment loading round out the contract the `browse` and `console`
//! binaries depend on, along with repository discovery so the binaries can
//! find the shipped data from wherever they are invoked.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod filter;
pub mod pages;
pub mod render;

pub use catalog::{
    Catalog, CatalogStore, Intervention, LoadError, Pillar, Screener, TestArea, Tier,
    load_catalog_from_path,
};
pub use filter::{FilterEngine, FilterOption, InvalidSelectionError, LEVELS, Level, ResultSet, Selection};
pub use pages::{PageError, load_page};

const DATA_FILE: &str = "data/interventions.json";
const PAGES_DIR: &str = "pages";
const MANIFEST: &str = "Cargo.toml";

/// Returns true when `candidate` looks like the repository root.
///
/// The check is intentionally strict: both the manifest and the shipped
/// data file must be present so discovery cannot land on an unrelated
/// crate while climbing.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(DATA_FILE).is_file() && candidate.join(MANIFEST).is_file()
}

/// Verifies that an explicit `PILLARFINDER_ROOT` hint points at a real repo.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root.
///
/// Search order: honor `PILLARFINDER_ROOT` if it points at a real repo,
/// fall back to climbing up from the current executable, then use the
/// build-time hint. Callers can treat failure as fatal because the binaries
/// cannot serve anything without the data layout.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("PILLARFINDER_ROOT") {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("PILLARFINDER_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the pillarfinder repository root. Set PILLARFINDER_ROOT to the cloned repository."
    );
}

/// Canonical location of the shipped catalog document.
pub fn default_data_path(repo_root: &Path) -> PathBuf {
    repo_root.join(DATA_FILE)
}

/// Canonical location of the static page fragments.
pub fn default_pages_root(repo_root: &Path) -> PathBuf {
    repo_root.join(PAGES_DIR)
}
