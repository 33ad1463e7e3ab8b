//! The cascading-filter engine.
//!
//! Owns the selection, validates every mutation against the catalog, and
//! derives the option lists and result set the shells render. The one rule
//! that matters: setting a level clears everything below it, so a lower
//! level can never outlive the ancestor chain that justified it. A rejected
//! mutation leaves the engine exactly as it was; callers recover by
//! re-fetching `options_for` and re-rendering.

use crate::catalog::{CatalogStore, Intervention, TestArea, Tier};
use crate::filter::selection::{Level, Selection};
use serde::Serialize;
use std::fmt;

/// One candidate choice for a filter level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub id: String,
    pub name: String,
}

impl FilterOption {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Outcome of `current_results`.
///
/// `Incomplete` is a display state, not an error: at least one level is
/// still unselected. `Complete` carries the resolved pillar's interventions,
/// which may legitimately be an empty list; callers render "nothing
/// selected yet" and "zero matches" differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultSet<'a> {
    Incomplete,
    Complete(&'a [Intervention]),
}

/// A `set_level` value that does not resolve under the current ancestors.
///
/// Recoverable by construction: the engine state is untouched, so the caller
/// re-syncs its option lists and carries on. Seeing one usually means the
/// caller offered a stale option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSelectionError {
    pub level: Level,
    pub value: String,
}

impl fmt::Display for InvalidSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no {} '{}' under the current selection",
            self.level.label(),
            self.value
        )
    }
}

impl std::error::Error for InvalidSelectionError {}

/// Four-level filter over a loaded catalog.
///
/// Borrows the store for its whole lifetime, so the catalog cannot change
/// underneath a live selection and mutation is serialized by `&mut self`.
#[derive(Debug)]
pub struct FilterEngine<'a> {
    store: &'a CatalogStore,
    selection: Selection,
}

impl<'a> FilterEngine<'a> {
    /// Engine with an all-empty selection.
    pub fn new(store: &'a CatalogStore) -> Self {
        Self {
            store,
            selection: Selection::default(),
        }
    }

    /// The current selection, read-only.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set or clear one level, then cascade-clear everything below it.
    ///
    /// `Some(value)` must resolve as a child of the entity named by the
    /// levels strictly above; otherwise the call is rejected and nothing
    /// changes. `None` always succeeds and still cascades, since only
    /// descendants can depend on the cleared value.
    pub fn set_level(
        &mut self,
        level: Level,
        value: Option<&str>,
    ) -> Result<(), InvalidSelectionError> {
        if let Some(candidate) = value {
            if !self.resolves(level, candidate) {
                return Err(InvalidSelectionError {
                    level,
                    value: candidate.to_string(),
                });
            }
        }
        self.selection.set(level, value.map(str::to_string));
        self.selection.clear_below(level);
        Ok(())
    }

    /// Clear all four levels. Always succeeds; idempotent.
    pub fn reset(&mut self) {
        self.selection = Selection::default();
    }

    /// Candidate choices for `level` given the levels above it.
    ///
    /// Level 0 always lists every tier. A lower level returns the resolved
    /// parent's children, or an empty list when any level above is still
    /// unselected (or no longer resolves); the caller treats that as a
    /// disabled filter with no choices yet.
    pub fn options_for(&self, level: Level) -> Vec<FilterOption> {
        let selection = &self.selection;
        match level {
            Level::Tier => self
                .store
                .tiers()
                .iter()
                .map(|tier| FilterOption::new(&tier.id, &tier.name))
                .collect(),
            Level::Screener => self
                .resolve_tier()
                .map(|tier| {
                    tier.screeners
                        .iter()
                        .map(|screener| FilterOption::new(&screener.id, &screener.name))
                        .collect()
                })
                .unwrap_or_default(),
            Level::TestArea => selection
                .get(Level::Tier)
                .zip(selection.get(Level::Screener))
                .and_then(|(tier, screener)| self.store.find_screener(tier, screener))
                .map(|screener| {
                    screener
                        .test_areas
                        .iter()
                        .map(|area| FilterOption::new(&area.id, &area.name))
                        .collect()
                })
                .unwrap_or_default(),
            Level::Pillar => self
                .resolve_test_area()
                .map(|area| {
                    area.pillars
                        .iter()
                        .map(|pillar| FilterOption::new(&pillar.id, &pillar.name))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Result set for the current selection.
    pub fn current_results(&self) -> ResultSet<'a> {
        let selection = &self.selection;
        let resolved = selection
            .get(Level::Tier)
            .zip(selection.get(Level::Screener))
            .zip(selection.get(Level::TestArea))
            .zip(selection.get(Level::Pillar))
            .and_then(|(((tier, screener), area), pillar)| {
                self.store.find_pillar(tier, screener, area, pillar)
            });
        match resolved {
            Some(pillar) => ResultSet::Complete(&pillar.interventions),
            None => ResultSet::Incomplete,
        }
    }

    fn resolve_tier(&self) -> Option<&'a Tier> {
        self.store.find_tier(self.selection.get(Level::Tier)?)
    }

    fn resolve_test_area(&self) -> Option<&'a TestArea> {
        let tier = self.selection.get(Level::Tier)?;
        let screener = self.selection.get(Level::Screener)?;
        let area = self.selection.get(Level::TestArea)?;
        self.store.find_test_area(tier, screener, area)
    }

    /// Whether `candidate` is a child of the entity resolved by the levels
    /// strictly above `level`. An unselected ancestor means it cannot be.
    fn resolves(&self, level: Level, candidate: &str) -> bool {
        let selection = &self.selection;
        match level {
            Level::Tier => self.store.find_tier(candidate).is_some(),
            Level::Screener => selection
                .get(Level::Tier)
                .and_then(|tier| self.store.find_screener(tier, candidate))
                .is_some(),
            Level::TestArea => selection
                .get(Level::Tier)
                .zip(selection.get(Level::Screener))
                .and_then(|(tier, screener)| {
                    self.store.find_test_area(tier, screener, candidate)
                })
                .is_some(),
            Level::Pillar => selection
                .get(Level::Tier)
                .zip(selection.get(Level::Screener))
                .zip(selection.get(Level::TestArea))
                .and_then(|((tier, screener), area)| {
                    self.store.find_pillar(tier, screener, area, candidate)
                })
                .is_some(),
        }
    }

    /// Assertion helper: every set level must resolve through its ancestors.
    #[cfg(test)]
    fn invariant_holds(&self) -> bool {
        for level in crate::filter::selection::LEVELS {
            if let Some(value) = self.selection.get(level) {
                if !self.resolves(level, value) {
                    return false;
                }
            }
        }
        true
    }
}
