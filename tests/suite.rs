// Centralized integration suite for the catalog browser; exercises the
// shipped data file, the filter cascade over every reachable chain, page
// fragments, and both binaries end-to-end so changes surface in one place.
mod support;

use anyhow::{Context, Result};
use pillarfinder::{
    CatalogStore, FilterEngine, Level, ResultSet, default_data_path, default_pages_root,
    load_page,
};
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use support::{browse_binary, console_binary, repo_root, run_command, run_with_stdin};

fn shipped_store() -> Result<CatalogStore> {
    let mut store = CatalogStore::new();
    let data_path = default_data_path(&repo_root());
    store
        .load(&data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;
    Ok(store)
}

// Walks every reachable chain in the shipped catalog and checks that the
// option lists mirror the child lists exactly and the result set mirrors the
// resolved pillar's interventions.
#[test]
fn options_and_results_are_consistent_across_the_shipped_catalog() -> Result<()> {
    let store = shipped_store()?;
    let mut engine = FilterEngine::new(&store);

    let tier_options = engine.options_for(Level::Tier);
    assert_eq!(
        tier_options.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
        store.tiers().iter().map(|t| t.id.as_str()).collect::<Vec<_>>()
    );

    for tier in store.tiers() {
        engine.set_level(Level::Tier, Some(&tier.id)).unwrap();
        let screener_ids: Vec<_> = engine
            .options_for(Level::Screener)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(
            screener_ids,
            tier.screeners.iter().map(|s| s.id.clone()).collect::<Vec<_>>()
        );

        for screener in &tier.screeners {
            engine.set_level(Level::Screener, Some(&screener.id)).unwrap();
            for area in &screener.test_areas {
                engine.set_level(Level::TestArea, Some(&area.id)).unwrap();
                let pillar_ids: Vec<_> = engine
                    .options_for(Level::Pillar)
                    .into_iter()
                    .map(|o| o.id)
                    .collect();
                assert_eq!(
                    pillar_ids,
                    area.pillars.iter().map(|p| p.id.clone()).collect::<Vec<_>>()
                );

                for pillar in &area.pillars {
                    engine.set_level(Level::Pillar, Some(&pillar.id)).unwrap();
                    match engine.current_results() {
                        ResultSet::Complete(interventions) => {
                            assert_eq!(interventions, pillar.interventions.as_slice())
                        }
                        ResultSet::Incomplete => {
                            panic!("complete chain reported incomplete: {:?}", engine.selection())
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

// The same child id under different parents must resolve per-scope: both
// tiers carry an "acadience" screener, but only the tier-1 instance has the
// nonsense-word-fluency area.
#[test]
fn shipped_catalog_exercises_scoped_resolution() -> Result<()> {
    let store = shipped_store()?;

    let core = store.find_screener("t1", "acadience").unwrap();
    let targeted = store.find_screener("t2", "acadience").unwrap();
    assert_ne!(core.test_areas.len(), targeted.test_areas.len());

    assert!(store.find_test_area("t1", "acadience", "nwf").is_some());
    assert!(store.find_test_area("t2", "acadience", "nwf").is_none());

    // Sight-words pillar ships with zero interventions: a complete selection
    // that legitimately produces an empty result list.
    let sight_words = store
        .find_pillar("t3", "corephonics", "decoding", "sw")
        .unwrap();
    assert!(sight_words.interventions.is_empty());
    Ok(())
}

#[test]
fn targeted_phonics_boost_chain_resolves() -> Result<()> {
    let store = shipped_store()?;
    let mut engine = FilterEngine::new(&store);

    engine.set_level(Level::Tier, Some("t2")).unwrap();
    engine.set_level(Level::Screener, Some("acadience")).unwrap();
    engine.set_level(Level::TestArea, Some("psf")).unwrap();
    engine.set_level(Level::Pillar, Some("pa")).unwrap();

    match engine.current_results() {
        ResultSet::Complete(interventions) => {
            assert!(interventions.iter().any(|i| i.name == "Phonics Boost"));
        }
        ResultSet::Incomplete => panic!("chain should be complete"),
    }

    // A stale option is rejected without disturbing the selection.
    assert!(engine.set_level(Level::TestArea, Some("nwf")).is_err());
    assert_eq!(engine.selection().test_area.as_deref(), Some("psf"));
    assert_eq!(engine.selection().pillar.as_deref(), Some("pa"));
    Ok(())
}

#[test]
fn page_fragments_are_served_from_the_pages_root() -> Result<()> {
    let pages_root = default_pages_root(&repo_root());
    let home = load_page(&pages_root, "home")?;
    assert!(home.contains("Interventions Reference"));
    let about = load_page(&pages_root, "about")?;
    assert!(about.contains("About this catalog"));
    assert!(load_page(&pages_root, "../data/interventions").is_err());
    Ok(())
}

#[test]
fn browse_lists_tiers_when_nothing_is_selected() -> Result<()> {
    let mut cmd = Command::new(browse_binary());
    cmd.env("PILLARFINDER_ROOT", repo_root());
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tier options:"));
    assert!(stdout.contains("t1"));
    assert!(stdout.contains("Tier 3 — Intensive Intervention"));
    Ok(())
}

#[test]
fn browse_prints_cards_for_a_complete_chain() -> Result<()> {
    let mut cmd = Command::new(browse_binary());
    cmd.env("PILLARFINDER_ROOT", repo_root());
    cmd.args([
        "--tier", "t2", "--screener", "acadience", "--area", "psf", "--pillar", "pa",
    ]);
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Phonics Boost"));
    assert!(stdout.contains("group size:  1-3 students"));
    Ok(())
}

#[test]
fn browse_json_output_is_parseable_in_both_states() -> Result<()> {
    let mut complete = Command::new(browse_binary());
    complete.env("PILLARFINDER_ROOT", repo_root());
    complete.args([
        "--json", "--tier", "t2", "--screener", "acadience", "--area", "psf", "--pillar", "pa",
    ]);
    let output = run_command(complete)?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    let results = value.get("results").and_then(Value::as_array).unwrap();
    assert!(
        results
            .iter()
            .any(|r| r.get("name").and_then(Value::as_str) == Some("Phonics Boost"))
    );

    let mut partial = Command::new(browse_binary());
    partial.env("PILLARFINDER_ROOT", repo_root());
    partial.args(["--json", "--tier", "t1"]);
    let output = run_command(partial)?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        value.get("nextLevel").and_then(Value::as_str),
        Some("screener")
    );
    let options = value.get("options").and_then(Value::as_array).unwrap();
    assert!(
        options
            .iter()
            .any(|o| o.get("id").and_then(Value::as_str) == Some("acadience"))
    );
    Ok(())
}

#[test]
fn browse_rejects_an_unresolvable_selection() -> Result<()> {
    let mut cmd = Command::new(browse_binary());
    cmd.env("PILLARFINDER_ROOT", repo_root());
    cmd.args(["--tier", "bogus"]);
    let output = cmd.output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no tier 'bogus'"));
    Ok(())
}

#[test]
fn browse_accepts_a_custom_data_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(
        br#"[{"id": "x1", "name": "Experimental Tier", "screeners": []}]"#,
    )?;
    file.flush()?;

    let mut cmd = Command::new(browse_binary());
    cmd.env("PILLARFINDER_ROOT", repo_root());
    cmd.arg("--data").arg(file.path());
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Experimental Tier"));
    Ok(())
}

#[test]
fn console_session_walks_selects_and_recovers() -> Result<()> {
    let script = "tier bogus\n\
                  tier t2\n\
                  screener acadience\n\
                  area psf\n\
                  pillar pa\n\
                  results\n\
                  page home\n\
                  page missing\n\
                  reset\n\
                  show\n\
                  quit\n";
    let mut cmd = Command::new(console_binary());
    cmd.env("PILLARFINDER_ROOT", repo_root());
    let output = run_with_stdin(cmd, script)?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("error: no tier 'bogus'"));
    assert!(stdout.contains("Phonics Boost"));
    assert!(stdout.contains("Interventions Reference"));
    assert!(stdout.contains("could not load content"));
    assert!(stdout.contains("selection cleared"));
    assert!(stdout.contains("tier options:"));
    Ok(())
}
