//! One-shot catalog query CLI.
//!
//! Applies any `--tier/--screener/--area/--pillar` arguments top-down
//! through the filter engine, then prints either the matching intervention
//! cards (selection complete) or the option list for the next level to
//! choose. `--json` switches to machine-readable output so the command can
//! sit in pipelines.

use anyhow::{Context, Result, anyhow, bail};
use pillarfinder::{
    CatalogStore, FilterEngine, Level, ResultSet, default_data_path, find_repo_root, render,
};
use serde_json::json;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;

    let data_path = match cli.data {
        Some(path) => path,
        None => default_data_path(&find_repo_root()?),
    };
    let mut store = CatalogStore::new();
    store
        .load(&data_path)
        .with_context(|| format!("loading catalog from {}", data_path.display()))?;

    let mut engine = FilterEngine::new(&store);
    let requested = [
        (Level::Tier, &cli.tier),
        (Level::Screener, &cli.screener),
        (Level::TestArea, &cli.area),
        (Level::Pillar, &cli.pillar),
    ];
    for (level, value) in requested {
        if let Some(value) = value {
            engine.set_level(level, Some(value))?;
        }
    }

    let output = if cli.json {
        render_json(&engine)?
    } else {
        render_text(&engine).map_err(|err| anyhow!("formatting output: {err}"))?
    };
    print!("{output}");
    Ok(())
}

fn render_text(engine: &FilterEngine<'_>) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    render::render_selection(engine.selection(), &mut out)?;
    out.push('\n');
    match engine.selection().first_empty() {
        None => render::render_results(engine.current_results(), &mut out)?,
        Some(level) => render::render_options(level, &engine.options_for(level), &mut out)?,
    }
    Ok(out)
}

fn render_json(engine: &FilterEngine<'_>) -> Result<String> {
    let value = match engine.current_results() {
        ResultSet::Complete(interventions) => json!({
            "selection": engine.selection(),
            "results": interventions,
        }),
        ResultSet::Incomplete => {
            // first_empty is Some whenever results are incomplete.
            let next = engine
                .selection()
                .first_empty()
                .ok_or_else(|| anyhow!("incomplete selection with no empty level"))?;
            json!({
                "selection": engine.selection(),
                "nextLevel": next.label(),
                "options": engine.options_for(next),
            })
        }
    };
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}

struct Cli {
    data: Option<PathBuf>,
    tier: Option<String>,
    screener: Option<String>,
    area: Option<String>,
    pillar: Option<String>,
    json: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();

        let mut cli = Cli {
            data: None,
            tier: None,
            screener: None,
            area: None,
            pillar: None,
            json: false,
        };

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--data" => cli.data = Some(PathBuf::from(take_value(&mut args, "--data")?)),
                "--tier" => cli.tier = Some(take_value(&mut args, "--tier")?),
                "--screener" => cli.screener = Some(take_value(&mut args, "--screener")?),
                "--area" => cli.area = Some(take_value(&mut args, "--area")?),
                "--pillar" => cli.pillar = Some(take_value(&mut args, "--pillar")?),
                "--json" => cli.json = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(cli)
    }
}

fn take_value(args: &mut env::ArgsOs, flag: &str) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    value
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: browse [--data PATH] [--tier ID] [--screener ID] [--area ID] [--pillar ID] [--json]\n\nOptions:\n  --data PATH      Catalog document to load (default: data/interventions.json in the repo).\n  --tier ID        Select a tier, then narrow with the flags below.\n  --screener ID    Select a screener within the tier.\n  --area ID        Select a test area within the screener.\n  --pillar ID      Select a pillar within the test area.\n  --json           Emit JSON instead of text.\n  --help           Show this help text.\n\nWith all four filters set, the matching interventions are printed;\notherwise the options for the next unselected filter are listed."
    );
    std::process::exit(code);
}
