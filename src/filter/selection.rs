//! The four-level selection and its ordering.
//!
//! `Level` fixes the cascade order (tier → screener → test area → pillar);
//! `Selection` holds at most one identifier per level. The cascade invariant
//! (a level may hold a value only while every level above it is set and
//! resolves to a parent containing it) is enforced by `FilterEngine`, which
//! is the only mutator. `Selection` itself just provides the ordered
//! plumbing (`get`/`set`/`clear_below`) that makes the rule easy to state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four filter levels, in cascade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Tier,
    Screener,
    TestArea,
    Pillar,
}

/// All levels, top to bottom.
pub const LEVELS: [Level; 4] = [Level::Tier, Level::Screener, Level::TestArea, Level::Pillar];

impl Level {
    /// Position in the cascade order, 0 through 3.
    pub fn index(self) -> usize {
        match self {
            Level::Tier => 0,
            Level::Screener => 1,
            Level::TestArea => 2,
            Level::Pillar => 3,
        }
    }

    /// Inverse of `index`; `None` outside 0..=3.
    pub fn from_index(index: usize) -> Option<Self> {
        LEVELS.get(index).copied()
    }

    /// Human-readable label used in messages and rendered output.
    pub fn label(self) -> &'static str {
        match self {
            Level::Tier => "tier",
            Level::Screener => "screener",
            Level::TestArea => "test area",
            Level::Pillar => "pillar",
        }
    }

    /// Parse a console keyword (`tier`, `screener`, `area`, `pillar`).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "tier" => Some(Level::Tier),
            "screener" => Some(Level::Screener),
            "area" | "testarea" | "test-area" => Some(Level::TestArea),
            "pillar" => Some(Level::Pillar),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current value of each filter, `None` meaning unselected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub tier: Option<String>,
    pub screener: Option<String>,
    #[serde(rename = "testArea")]
    pub test_area: Option<String>,
    pub pillar: Option<String>,
}

impl Selection {
    /// Value at `level`, if any.
    pub fn get(&self, level: Level) -> Option<&str> {
        match level {
            Level::Tier => self.tier.as_deref(),
            Level::Screener => self.screener.as_deref(),
            Level::TestArea => self.test_area.as_deref(),
            Level::Pillar => self.pillar.as_deref(),
        }
    }

    pub(crate) fn set(&mut self, level: Level, value: Option<String>) {
        match level {
            Level::Tier => self.tier = value,
            Level::Screener => self.screener = value,
            Level::TestArea => self.test_area = value,
            Level::Pillar => self.pillar = value,
        }
    }

    /// Empty every level strictly below `level`.
    pub(crate) fn clear_below(&mut self, level: Level) {
        for lower in LEVELS.into_iter().skip(level.index() + 1) {
            self.set(lower, None);
        }
    }

    /// Topmost unselected level, if the selection is not yet complete.
    pub fn first_empty(&self) -> Option<Level> {
        LEVELS.into_iter().find(|level| self.get(*level).is_none())
    }

    /// True when all four levels hold a value.
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }
}
