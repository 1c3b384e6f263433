//! omnibar - interactive search panel CLI
//!
//! One-shot mode (`omnibar "query"`) runs a single search to settlement
//! and prints the visible result set. Without a query it drops into a
//! small interactive loop driving the same panel state.

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use itertools::Itertools;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use omnibar::config::Config;
use omnibar::facet::{FacetConfig, Tab, TabState};
use omnibar::fixtures::{default_fixtures, load_fixtures};
use omnibar::item::Category;
use omnibar::panel::remote::HttpSource;
use omnibar::panel::{PanelSnapshot, SearchPanel, TabBadge};

#[derive(Parser, Debug)]
#[command(
    name = "omnibar",
    version,
    about = "Debounced remote search with ranked local fallback"
)]
struct Cli {
    /// Query to search for; omit for interactive mode
    query: Option<String>,

    /// Config file path (also OMNIBAR_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search endpoint, overriding config
    #[arg(long)]
    endpoint: Option<String>,

    /// Debounce window in milliseconds, overriding config
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Start on this tab: all, files, people, chats, lists
    #[arg(long, default_value = "all")]
    tab: String,

    /// Disable a category up front (repeatable)
    #[arg(long = "disable", value_name = "CATEGORY")]
    disabled: Vec<String>,

    /// JSON output (snapshot shape) instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": true,
                    "message": format!("{e:#}"),
                });
                println!("{}", serde_json::to_string(&error_json).unwrap_or_default());
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("load configuration")?;
    if let Some(endpoint) = &cli.endpoint {
        config.search.endpoint = endpoint.clone();
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.search.debounce_ms = debounce_ms;
    }

    let fixtures = match &config.fixtures.path {
        Some(path) => load_fixtures(path).context("load fixture corpus")?,
        None => default_fixtures(),
    };

    let mut enabled = FacetConfig::default();
    for raw in &cli.disabled {
        let Some(category) = Category::parse(raw) else {
            bail!("unknown category: {raw}");
        };
        enabled.toggle(category);
    }
    let tabs = TabState::new(enabled, Tab::parse(&cli.tab));

    let source = HttpSource::new(
        config.search.endpoint.clone(),
        config.search.request_timeout(),
    );
    let panel = SearchPanel::with_options(source, fixtures, config.search.debounce(), tabs);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match &cli.query {
        Some(query) => runtime.block_on(one_shot(&panel, query, cli.json)),
        None => runtime.block_on(interactive(&panel, cli.json)),
    }
}

async fn one_shot(panel: &SearchPanel<HttpSource>, query: &str, json: bool) -> Result<()> {
    panel.set_query(query);
    panel.settled().await;
    print_snapshot(&panel.snapshot(), &panel.tabs(), json)
}

/// Line-oriented interactive mode. Plain input becomes the query;
/// `:tab <key>`, `:toggle <category>` and `:quit` drive the rest of the
/// panel surface.
async fn interactive(panel: &SearchPanel<HttpSource>, json: bool) -> Result<()> {
    if !json {
        println!("omnibar interactive - type to search, :tab <key>, :toggle <category>, :quit");
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        if input == ":quit" || input == ":q" {
            break;
        }

        match input.split_once(' ') {
            Some((":tab", key)) => {
                if !panel.select_tab(Tab::parse(key.trim())) {
                    eprintln!("tab '{}' is disabled", key.trim());
                }
            }
            Some((":toggle", raw)) => match Category::parse(raw.trim()) {
                Some(category) => panel.toggle_category(category),
                None => eprintln!("unknown category: {}", raw.trim()),
            },
            _ => {
                panel.set_query(input);
                panel.settled().await;
            }
        }

        print_snapshot(&panel.snapshot(), &panel.tabs(), json)?;
    }
    Ok(())
}

fn print_snapshot(snapshot: &PanelSnapshot, tabs: &[TabBadge], json: bool) -> Result<()> {
    if json {
        let payload = serde_json::json!({
            "snapshot": snapshot,
            "tabs": tabs,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let strip = tabs
        .iter()
        .map(|badge| format!("{} ({})", badge.tab.as_str(), badge.count))
        .join("  ");
    println!("tabs: {strip}   [active: {}]", snapshot.active_tab.as_str());

    if snapshot.visible.is_empty() {
        println!("No results");
    } else {
        for item in &snapshot.visible {
            match &item.subtitle {
                Some(subtitle) => {
                    println!("  [{:<7}] {} - {}", item.kind.as_str(), item.title, subtitle);
                }
                None => println!("  [{:<7}] {}", item.kind.as_str(), item.title),
            }
        }
    }

    if snapshot.provenance == omnibar::Provenance::LocalFallback {
        println!("(local results - remote search unavailable)");
    }
    Ok(())
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,omnibar=info",
        1 => "info,omnibar=debug",
        2 => "debug,omnibar=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.json {
        // Keep stdout parseable; logs go to stderr as JSON too.
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
