// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use animeshelf::application::commands::*;
use animeshelf::application::dto::*;
use animeshelf::application::{AppState, ErrorResponse};
use animeshelf::config::Config;
use animeshelf::db::{create_connection_pool, get_connection, initialize_database};
use animeshelf::error::{AppError, AppResult};
use animeshelf::integrations::{CatalogSnapshot, IndexSelector};
use animeshelf::services::MarkOutcome;

#[derive(Parser)]
#[command(name = "animeshelf")]
#[command(about = "Track which anime episodes you have watched", long_about = None)]
struct Cli {
    /// Database file path
    #[arg(short, long, env = "ANIMESHELF_DB", global = true)]
    database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every title in the library
    List,

    /// Find a title by exact name, adding it from a catalog snapshot if unknown
    Find {
        name: String,

        /// JSON catalog snapshot to search when the title is not in the library
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Which search result to adopt (0 = first)
        #[arg(long, default_value = "0")]
        pick: usize,
    },

    /// Show the stored episodes of a title
    Episodes {
        title_id: String,

        /// Only watched episodes
        #[arg(long)]
        watched: bool,
    },

    /// Mark an episode as watched, e.g. `watch "naruto-tv 12"`
    Watch { episode: String },

    /// Rate a title from 0 (unrated) to 5 stars
    Rate { title_id: String, stars: i64 },

    /// Delete a title and all of its episodes
    Remove { title_id: String },

    /// Watched percentage of a title
    Progress { title_id: String },

    /// Integrity check and library counters
    Check,

    /// Drop all stored data
    Reset {
        /// Required, there is no undo
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1. INFRASTRUCTURE
    let config = Config::resolve(cli.database.clone())?;
    let pool = create_connection_pool(&config.database_path, config.pool_size)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn).context("initializing schema")?;
    }

    // 2. REPOSITORIES + SERVICES
    let state = AppState::new(Arc::new(pool));

    // 3. COMMAND
    match run(&state, cli.command, cli.json) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            let response = ErrorResponse::from_app_error(e);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                eprintln!("{}", response.render());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(state: &AppState, command: Command, json: bool) -> AppResult<()> {
    match command {
        Command::List => {
            let titles = list_titles(state)?;
            if json {
                return print_json(&titles);
            }
            if titles.is_empty() {
                println!("Library is empty.");
            }
            for title in &titles {
                print_title(title);
            }
        }

        Command::Find {
            name,
            catalog,
            pick,
        } => {
            let catalog = match catalog {
                Some(path) => CatalogSnapshot::load(&path)?,
                None => CatalogSnapshot::default(),
            };
            let found = discover_title(state, &name, &catalog, &IndexSelector::new(pick))?;
            if json {
                return print_json(&found);
            }
            match found {
                DiscoveryDto::Library { titles } => titles.iter().for_each(print_title),
                DiscoveryDto::Imported { title, import } => {
                    print_title(&title);
                    println!(
                        "Imported {} episodes ({} without link, {} failed).",
                        import.imported, import.without_link, import.failed
                    );
                }
                DiscoveryDto::AlreadyKnown { title } => print_title(&title),
                DiscoveryDto::Cancelled => println!("Nothing selected."),
            }
        }

        Command::Episodes { title_id, watched } => {
            let episodes = list_episodes(state, &title_id, watched)?;
            if json {
                return print_json(&episodes);
            }
            for episode in &episodes {
                let mark = if episode.watched { "✔️" } else { "❌" };
                println!("Episode {} {}  {}", episode.number, mark, episode.link);
            }
        }

        Command::Watch { episode } => {
            let outcome = mark_watched(state, &episode)?;
            if json {
                return print_json(&outcome);
            }
            match outcome {
                MarkOutcome::Marked => println!("Marked {} as watched.", episode),
                MarkOutcome::UnknownEpisode => println!("No stored episode {}.", episode),
            }
        }

        Command::Rate { title_id, stars } => {
            let title = rate_title(state, &title_id, stars)?;
            if json {
                return print_json(&title);
            }
            print_title(&title);
        }

        Command::Remove { title_id } => {
            let removal = remove_title(state, &title_id)?;
            if json {
                return print_json(&removal);
            }
            println!(
                "Removed {} and {} episodes.",
                removal.title_id, removal.episodes_removed
            );
        }

        Command::Progress { title_id } => {
            let progress = get_progress(state, &title_id)?;
            if json {
                return print_json(&progress);
            }
            match get_percent_watched(state, &title_id) {
                Ok(percent) => println!(
                    "{}: {}/{} watched ({:.2}%)",
                    title_id, progress.watched, progress.total, percent
                ),
                Err(AppError::DivisionUndefined { .. }) => {
                    println!("{}: not available", title_id)
                }
                Err(e) => return Err(e),
            }
        }

        Command::Check => {
            let health = health_check(state)?;
            if json {
                return print_json(&health);
            }
            println!(
                "Integrity: {}",
                if health.integrity_ok { "ok" } else { "FAILED" }
            );
            println!(
                "Titles: {} ({} rated, {} completed)",
                health.library.total_titles,
                health.library.rated_titles,
                health.library.completed_titles
            );
            println!(
                "Episodes: {} ({} watched)",
                health.library.total_episodes, health.library.watched_episodes
            );
            println!("Size: {} bytes", health.database.size_bytes);
        }

        Command::Reset { yes } => {
            if !yes {
                return Err(AppError::Other(
                    "Refusing to reset without --yes".to_string(),
                ));
            }
            reset_library(state)?;
            println!("Library reset.");
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_title(title: &TitleDto) {
    let rating = if title.rating == 0 {
        "Not rated.".to_string()
    } else {
        "⭐".repeat(usize::from(title.rating))
    };
    let progress = match title.watched_percent {
        Some(percent) => format!("{:.2}%", percent),
        None => "no episodes".to_string(),
    };
    println!("{} [{}] {} {}", title.name, title.id, rating, progress);
}
