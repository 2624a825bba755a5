//! Command dispatch for the `docgate` binary.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use yansi::Paint;

use crate::cli::{Cli, Commands, IndexArgs, SearchArgs, ThemeAction};
use crate::config::Config;
use crate::error::ExitCode;
use crate::logging::init_logging;
use crate::search::{search_with, ContentIndex, SearchOptions, SearchOutcome};
use crate::session::{digest_hex, SessionGuard, SessionStatus};
use crate::storage::FileStore;
use crate::theme;

/// Run one CLI invocation and report how it ended.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);
    if cli.no_color || !io::stdout().is_terminal() {
        yansi::disable();
    }

    if let Commands::Digest(args) = &cli.command {
        println!("{}", digest_hex(&args.input));
        return Ok(ExitCode::Success);
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let store_path = resolve_store_path(cli.store.clone(), &config)?;
    let mut store = FileStore::open(&store_path)
        .with_context(|| format!("Failed to open store: {}", store_path.display()))?;

    match cli.command {
        Commands::Login(args) => {
            let password = match args.password {
                Some(password) => password,
                None => prompt_password()?,
            };
            let mut guard = SessionGuard::new(&mut store, config.guard_settings());
            if guard
                .authenticate(&password)
                .context("Failed to save session")?
            {
                println!("Access granted.");
                Ok(ExitCode::Success)
            } else {
                eprintln!("Incorrect password.");
                Ok(ExitCode::Locked)
            }
        }
        Commands::Status => {
            let mut guard = SessionGuard::new(&mut store, config.guard_settings());
            let status = guard.inspect();
            match status {
                SessionStatus::Valid { remaining_ms } => println!(
                    "{} (expires in {})",
                    status.label(),
                    format_remaining(remaining_ms)
                ),
                _ => println!("{}", status.label()),
            }
            Ok(if status.is_authenticated() {
                ExitCode::Success
            } else {
                ExitCode::Locked
            })
        }
        Commands::Logout => {
            SessionGuard::new(&mut store, config.guard_settings())
                .logout()
                .context("Failed to clear session")?;
            println!("Logged out.");
            Ok(ExitCode::Success)
        }
        Commands::Search(args) => {
            if !SessionGuard::new(&mut store, config.guard_settings()).is_authenticated() {
                return Ok(locked());
            }
            run_search(&args, &config)
        }
        Commands::Pages(args) => {
            if !SessionGuard::new(&mut store, config.guard_settings()).is_authenticated() {
                return Ok(locked());
            }
            run_pages(&args, &config)
        }
        Commands::Theme(args) => {
            let key = config.theme_key.as_str();
            let current = match args.action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => theme::load(&store, key),
                ThemeAction::Toggle => theme::toggle(&mut store, key)?,
                ThemeAction::Set { theme: choice } => {
                    theme::save(&mut store, key, choice)?;
                    choice
                }
            };
            println!("{}", current);
            Ok(ExitCode::Success)
        }
        Commands::Digest(_) => Ok(ExitCode::Success),
    }
}

fn resolve_store_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    flag.or_else(|| config.resolved_store_path())
        .context("No store path configured and no platform data directory available")
}

fn locked() -> ExitCode {
    eprintln!("Locked: run `docgate login` first.");
    ExitCode::Locked
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn load_index(args: &IndexArgs, config: &Config) -> Result<ContentIndex> {
    match args.index.as_ref().or(config.index_path.as_ref()) {
        Some(path) => ContentIndex::load(path)
            .with_context(|| format!("Failed to load content index: {}", path.display())),
        None => ContentIndex::builtin().context("Bundled content index is invalid"),
    }
}

#[derive(Serialize)]
struct JsonHit<'a> {
    title: &'a str,
    highlighted_title: String,
    url: &'a str,
    keywords: &'a [String],
    description: &'a str,
}

#[derive(Serialize)]
struct JsonSearch<'a> {
    query: &'a str,
    active: bool,
    results: Vec<JsonHit<'a>>,
}

fn run_search(args: &SearchArgs, config: &Config) -> Result<ExitCode> {
    let index = load_index(&args.index, config)?;
    let options = config.search_options();
    let outcome = search_with(&args.query, index.pages(), &options);

    if args.index.json {
        print_json(&json_outcome(&args.query, &outcome, &options))?;
    } else {
        print_outcome(&outcome, options.min_query_len);
    }

    Ok(match outcome {
        SearchOutcome::NoResults => ExitCode::NoResults,
        _ => ExitCode::Success,
    })
}

fn json_outcome<'a>(
    query: &'a str,
    outcome: &SearchOutcome<'a>,
    options: &SearchOptions,
) -> JsonSearch<'a> {
    JsonSearch {
        query,
        active: outcome.is_active(),
        results: outcome
            .hits()
            .iter()
            .map(|hit| JsonHit {
                title: &hit.page.title,
                highlighted_title: hit.highlighted_title(&options.marker),
                url: &hit.page.url,
                keywords: &hit.page.keywords,
                description: &hit.page.description,
            })
            .collect(),
    }
}

fn print_outcome(outcome: &SearchOutcome<'_>, min_query_len: usize) {
    match outcome {
        SearchOutcome::Inactive => {
            println!("Type at least {} characters to search.", min_query_len)
        }
        SearchOutcome::NoResults => println!("No results found."),
        SearchOutcome::Matches(hits) => {
            for hit in hits {
                let title = hit
                    .title
                    .render_with(|text| text.yellow().bold().to_string());
                println!("{}  {}", title, hit.page.url.dim());
                if !hit.page.description.is_empty() {
                    println!("    {}", hit.page.description);
                }
            }
        }
    }
}

fn run_pages(args: &IndexArgs, config: &Config) -> Result<ExitCode> {
    let index = load_index(args, config)?;
    if args.json {
        print_json(&index.pages())?;
    } else {
        for page in index.pages() {
            println!("{}  {}", page.title.bold(), page.url.dim());
        }
    }
    Ok(ExitCode::Success)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn format_remaining(ms: i64) -> String {
    let minutes = ms.max(0) / 60_000;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
