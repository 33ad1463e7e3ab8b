//! Cascading-filter state machine.
//!
//! `Selection` and `Level` define the four-level ordering; `FilterEngine`
//! owns the selection, validates mutations against the catalog, and derives
//! option lists and results. The shells never touch selection state
//! directly: every change goes through `FilterEngine::set_level` or
//! `FilterEngine::reset`.

pub mod engine;
pub mod selection;

pub use engine::{FilterEngine, FilterOption, InvalidSelectionError, ResultSet};
pub use selection::{LEVELS, Level, Selection};
