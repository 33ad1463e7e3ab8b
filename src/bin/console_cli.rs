//! Interactive console for the interventions catalog.
//!
//! Line-oriented shell: each command is translated into one engine call and
//! the derived view is re-rendered, so the session behaves like the four
//! dropdowns repopulating. Works identically when fed a script on stdin,
//! which is how the integration suite drives it.

use anyhow::{Context, Result, anyhow, bail};
use pillarfinder::{
    CatalogStore, FilterEngine, Level, default_data_path, default_pages_root, find_repo_root,
    pages, render,
};
use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;

    let repo_root = match (&cli.data, &cli.pages) {
        (Some(_), Some(_)) => None,
        _ => Some(find_repo_root()?),
    };
    let data_path = cli
        .data
        .or_else(|| repo_root.as_deref().map(default_data_path))
        .ok_or_else(|| anyhow!("no catalog path available"))?;
    let pages_root = cli
        .pages
        .or_else(|| repo_root.as_deref().map(default_pages_root))
        .ok_or_else(|| anyhow!("no pages directory available"))?;

    let mut store = CatalogStore::new();
    store
        .load(&data_path)
        .with_context(|| format!("loading catalog from {}", data_path.display()))?;
    let mut engine = FilterEngine::new(&store);

    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("interventions console; 'help' lists commands");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command")?;
        if !dispatch(line.trim(), &mut engine, &pages_root)? {
            break;
        }
    }
    Ok(())
}

/// Handle one command line; returns false when the session should end.
fn dispatch(line: &str, engine: &mut FilterEngine<'_>, pages_root: &Path) -> Result<bool> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };
    let argument = words.next();
    if words.next().is_some() {
        println!("too many arguments; try 'help'");
        return Ok(true);
    }

    match command {
        "tier" | "screener" | "area" | "pillar" => {
            // from_keyword accepts exactly the spellings matched above.
            let level = Level::from_keyword(command)
                .ok_or_else(|| anyhow!("unreachable level keyword {command}"))?;
            match engine.set_level(level, argument) {
                Ok(()) => print_view(engine)?,
                Err(err) => {
                    println!("error: {err}");
                    println!("'show' lists the options that are currently valid");
                }
            }
        }
        "reset" => {
            engine.reset();
            println!("selection cleared");
        }
        "show" => print_view(engine)?,
        "results" => {
            let mut out = String::new();
            render::render_results(engine.current_results(), &mut out)
                .map_err(|err| anyhow!("formatting results: {err}"))?;
            print!("{out}");
        }
        "page" => match argument {
            Some(name) => match pages::load_page(pages_root, name) {
                Ok(body) => print!("{body}"),
                Err(err) => println!("could not load content: {err}"),
            },
            None => println!("page requires a name, e.g. 'page home'"),
        },
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        other => println!("unknown command '{other}'; try 'help'"),
    }
    Ok(true)
}

/// Current selection plus either the next option list or the results.
fn print_view(engine: &FilterEngine<'_>) -> Result<()> {
    let mut out = String::new();
    render::render_selection(engine.selection(), &mut out)
        .and_then(|()| match engine.selection().first_empty() {
            Some(level) => render::render_options(level, &engine.options_for(level), &mut out),
            None => render::render_results(engine.current_results(), &mut out),
        })
        .map_err(|err| anyhow!("formatting view: {err}"))?;
    print!("{out}");
    Ok(())
}

fn print_help() {
    println!(
        "commands:\n  tier [ID]        select a tier (no ID clears it)\n  screener [ID]    select a screener within the tier\n  area [ID]        select a test area within the screener\n  pillar [ID]      select a pillar within the test area\n  reset            clear all four filters\n  show             print the selection and the next options\n  results          print the interventions for a complete selection\n  page NAME        print a static page fragment (e.g. 'page home')\n  help             this text\n  quit             end the session"
    );
}

struct Cli {
    data: Option<PathBuf>,
    pages: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut data = None;
        let mut pages = None;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--data" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--data requires a value"))?;
                    data = Some(PathBuf::from(value));
                }
                "--pages" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--pages requires a value"))?;
                    pages = Some(PathBuf::from(value));
                }
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self { data, pages })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: console [--data PATH] [--pages PATH]\n\nOptions:\n  --data PATH    Catalog document to load (default: data/interventions.json in the repo).\n  --pages PATH   Directory of page fragments (default: pages/ in the repo).\n  --help         Show this help text.\n\nReads commands from stdin; 'help' lists them."
    );
    std::process::exit(code);
}
