//! Plain-text rendering of engine output.
//!
//! Pure formatting over `fmt::Write`: option lists, selection summaries, and
//! intervention cards. No decisions are made here; the engine supplies the
//! data and the distinction between "selection incomplete" and "zero
//! results" is simply worded, not derived. Both shells share these routines
//! so their output stays identical.

use crate::catalog::Intervention;
use crate::filter::{FilterOption, LEVELS, Level, ResultSet, Selection};
use std::fmt;

/// One-line summary of the current selection, top to bottom.
pub fn render_selection(selection: &Selection, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "selection")?;
    for level in LEVELS {
        writeln!(
            writer,
            "  {:<10} {}",
            level.label(),
            selection.get(level).unwrap_or("-")
        )?;
    }
    Ok(())
}

/// The candidate list for one level, or a disabled marker when empty.
pub fn render_options(
    level: Level,
    options: &[FilterOption],
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    if options.is_empty() {
        writeln!(
            writer,
            "{} options: (locked until the levels above are chosen)",
            level.label()
        )?;
        return Ok(());
    }
    writeln!(writer, "{} options:", level.label())?;
    for option in options {
        writeln!(writer, "  {:<12} {}", option.id, option.name)?;
    }
    Ok(())
}

/// Result list for the current selection, with the two non-card states
/// worded apart: an unfinished selection versus a pillar with no entries.
pub fn render_results(results: ResultSet<'_>, writer: &mut impl fmt::Write) -> fmt::Result {
    match results {
        ResultSet::Incomplete => {
            writeln!(writer, "selection incomplete; choose all four filters first")
        }
        ResultSet::Complete([]) => {
            writeln!(writer, "no interventions recorded for this pillar")
        }
        ResultSet::Complete(interventions) => {
            for (idx, intervention) in interventions.iter().enumerate() {
                render_intervention(idx + 1, intervention, writer)?;
            }
            Ok(())
        }
    }
}

/// One intervention card.
pub fn render_intervention(
    idx: usize,
    intervention: &Intervention,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    writeln!(writer, "[#{}] {}", idx, intervention.name)?;
    writeln!(writer, "  description: {}", intervention.description)?;
    writeln!(writer, "  duration:    {}", intervention.duration)?;
    writeln!(writer, "  group size:  {}", intervention.group_size)?;
    writeln!(writer, "  frequency:   {}", intervention.frequency)?;
    if let Some(resources) = intervention
        .resources
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    {
        writeln!(writer, "  resources:   {}", resources)?;
    }
    writeln!(writer)?;
    Ok(())
}
