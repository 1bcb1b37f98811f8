//! CLI binary for propa.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use propa::guide::{NEEDS, SECTORS};
use propa::{Portal, PortalConfig, UserData, propa_dirs};
use propa_search::{Filter, ResultId, SearchMode, SearchOutcome, Source, SourceFilter};
use tracing_subscriber::EnvFilter;

/// Propa: search Italian public-administration open data.
#[derive(Parser)]
#[command(name = "propa", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding history and bookmarks.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Never contact dati.gov.it; search the bundled dataset only.
    #[arg(long)]
    offline: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search every source, or one with --source.
    Search {
        /// Search terms.
        query: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Toggle the bookmark of this result id from the results.
        #[arg(long)]
        bookmark: Option<String>,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the catalogued sources.
    Sources,

    /// Show one source.
    Source {
        /// Source id, e.g. `istat`.
        id: String,
    },

    /// Inspect or edit the search history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Inspect or edit bookmarks.
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Print an analytics report as JSON.
    Analytics {
        /// Run this search first and include its results in the report.
        query: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Recommend a source from the guided-search answers.
    Recommend {
        /// What you need: normativa, dati, documenti, servizi.
        need: String,
        /// Sector: salute, economia, ambiente, lavoro, istruzione, territorio, altro.
        sector: String,
    },

    /// Write history and bookmarks to a JSON file.
    ExportData {
        /// Destination file.
        path: PathBuf,
    },

    /// Replace history and bookmarks from a JSON file.
    ImportData {
        /// File produced by `export-data`.
        path: PathBuf,
    },

    /// Print the effective configuration.
    Config {
        /// Write the effective configuration to the config file.
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past searches, newest first.
    List,
    /// Delete one entry.
    Delete {
        /// Entry id as shown by `history list`.
        id: i64,
    },
    /// Delete every entry.
    Clear,
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// List bookmarks, newest first.
    List,
    /// Remove one bookmark.
    Remove {
        /// Result id.
        id: String,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Restrict to one source id.
    #[arg(long)]
    source: Option<String>,
    /// Restrict to one category (or exact tag).
    #[arg(long)]
    category: Option<String>,
    /// Earliest date, YYYY-MM-DD, inclusive.
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest date, YYYY-MM-DD, inclusive.
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Source-specific refinement as JSON, e.g. '{"source":"normattiva","actNumber":"33"}'.
    #[arg(long, value_parser = parse_specific)]
    specific: Option<SourceFilter>,
}

impl FilterArgs {
    fn to_filter(&self) -> Filter {
        let mut filter = Filter::all().with_dates(self.from, self.to);
        if let Some(source) = &self.source {
            filter = filter.with_source(source.as_str());
        }
        if let Some(category) = &self.category {
            filter = filter.with_category(category.as_str());
        }
        if let Some(specific) = &self.specific {
            filter = filter.with_specific(specific.clone());
        }
        filter
    }
}

fn parse_specific(raw: &str) -> Result<SourceFilter, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("propa=info,propa_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(PortalConfig::default_config_path);
    let mut config = PortalConfig::load_or_default(&config_path)?;
    if cli.offline {
        config.search.mode = SearchMode::Offline;
    }

    if let Command::Config { init } = cli.command {
        return show_config(&config, &config_path, init);
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(propa_dirs::data_dir);
    let portal = Portal::from_config(&config, &data_dir)?;

    match cli.command {
        Command::Search {
            query,
            filter,
            bookmark,
            json,
        } => run_search(&portal, &query, &filter.to_filter(), bookmark, json).await,
        Command::Sources => {
            for source in portal.list_sources() {
                println!("{:<16} {}", source.id, source.name);
            }
            Ok(())
        }
        Command::Source { id } => match portal.get_source(&id) {
            Some(source) => {
                print_source(source);
                Ok(())
            }
            None => anyhow::bail!("Fonte sconosciuta: {id}"),
        },
        Command::History { action } => run_history(&portal, action),
        Command::Bookmarks { action } => run_bookmarks(&portal, action),
        Command::Analytics { query, filter } => {
            let results = match query {
                Some(q) => portal.search(&q, &filter.to_filter()).await?.results,
                None => Vec::new(),
            };
            println!("{}", serde_json::to_string_pretty(&portal.analytics(&results))?);
            Ok(())
        }
        Command::Recommend { need, sector } => {
            if !NEEDS.iter().any(|(n, _)| *n == need) {
                tracing::warn!(need, "unrecognised need, treating as data request");
            }
            if !SECTORS.iter().any(|(s, _)| *s == sector) {
                tracing::warn!(sector, "unrecognised sector");
            }
            match portal.recommend(&need, &sector) {
                Some(source) => {
                    println!("Ti consigliamo di cercare in {}.", source.name);
                    print_source(source);
                    Ok(())
                }
                None => anyhow::bail!("no source recommended"),
            }
        }
        Command::ExportData { path } => {
            let data = portal.export_data();
            data.save_to_file(&path)?;
            println!(
                "Esportati {} elementi della cronologia e {} preferiti in {}",
                data.history.as_ref().map_or(0, Vec::len),
                data.bookmarks.as_ref().map_or(0, Vec::len),
                path.display()
            );
            Ok(())
        }
        Command::ImportData { path } => {
            portal.import_data(UserData::from_file(&path)?)?;
            let stats = portal.store().stats();
            println!(
                "Importati: {} ricerche, {} preferiti",
                stats.history_count, stats.bookmarks_count
            );
            Ok(())
        }
        Command::Config { .. } => Ok(()),
    }
}

async fn run_search(
    portal: &Portal,
    query: &str,
    filter: &Filter,
    bookmark: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = portal.search(query, filter).await?;

    if let Some(id) = bookmark {
        match outcome.results.iter().find(|r| r.id.matches_str(&id)) {
            Some(result) => {
                let saved = portal.store().toggle_bookmark(result);
                eprintln!(
                    "{} {}",
                    if saved { "Aggiunto ai preferiti:" } else { "Rimosso dai preferiti:" },
                    result.title
                );
            }
            None => anyhow::bail!("result {id} is not among the results"),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(portal, &outcome);
    }
    Ok(())
}

fn print_outcome(portal: &Portal, outcome: &SearchOutcome) {
    println!(
        "{} risultati per \"{}\" (fonte dati: {})\n",
        outcome.total, outcome.query, outcome.origin
    );
    let saved: Vec<ResultId> = portal
        .store()
        .list_bookmarks()
        .into_iter()
        .map(|b| b.result.id)
        .collect();
    for result in &outcome.results {
        let marker = if saved.contains(&result.id) { "*" } else { " " };
        println!("{marker} [{}] {}", result.id, result.title);
        println!(
            "    {} | {} | {}",
            portal.registry().display_name(&result.source),
            result.category,
            result.date
        );
        println!("    {}", result.url);
    }
}

fn print_source(source: &Source) {
    println!("{} ({})", source.name, source.id);
    println!("  {}", source.description);
    println!("  {}", source.details);
    println!("  URL: {}", source.url);
}

fn run_history(portal: &Portal, action: HistoryAction) -> anyhow::Result<()> {
    let store = portal.store();
    match action {
        HistoryAction::List => {
            for entry in store.list_history() {
                println!(
                    "{}  {}  {}  (fonte: {}, categoria: {})",
                    entry.id,
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.query,
                    String::from(entry.filters.source.clone()),
                    String::from(entry.filters.category.clone()),
                );
            }
        }
        HistoryAction::Delete { id } => {
            if !store.delete_history(id) {
                anyhow::bail!("no history entry {id}");
            }
        }
        HistoryAction::Clear => store.clear_history(),
    }
    Ok(())
}

fn run_bookmarks(portal: &Portal, action: BookmarkAction) -> anyhow::Result<()> {
    let store = portal.store();
    match action {
        BookmarkAction::List => {
            for bookmark in store.list_bookmarks() {
                let result = &bookmark.result;
                println!("[{}] {}", result.id, result.title);
                println!(
                    "    {} | salvato il {}",
                    portal.registry().display_name(&result.source),
                    bookmark.bookmarked_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        BookmarkAction::Remove { id } => {
            let saved = store
                .list_bookmarks()
                .into_iter()
                .find(|b| b.result.id.matches_str(&id));
            match saved {
                Some(bookmark) if store.remove_bookmark(&bookmark.result.id) => {}
                _ => anyhow::bail!("no bookmark {id}"),
            }
        }
    }
    Ok(())
}

fn show_config(config: &PortalConfig, path: &Path, init: bool) -> anyhow::Result<()> {
    config.validate()?;
    if init {
        config.save_to_file(path)?;
        eprintln!("Configurazione scritta in {}", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
