use clap::{ArgAction, Parser, Subcommand};
use cinemap_models::{Decade, MediaKind};
use commands::context::{Catalog, Settings};
use commands::{best, browse, clear, config, countries, details, explore, genres, search, watchlist};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinemap")]
#[command(about = "cinemap - Explore movies and shows by country of origin and decade")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the countries that can be browsed
    Countries,

    /// Browse a country's movies or shows grouped by decade
    #[command(long_about = "Collect the catalog of one country (popular, top rated and per-decade discovery, with an original-language fallback for countries that come back empty), then show it grouped by decade and sorted by rating.")]
    Browse {
        /// Country name or ISO code (e.g. "Japan" or "JP")
        country: String,

        /// Browse TV shows instead of movies
        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,

        /// Only titles with this genre (repeatable, any of them matches)
        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,

        /// Only this decade (e.g. 1990s, 2020s)
        #[arg(long)]
        decade: Option<Decade>,

        /// Rows per decade
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Best rated and trending titles worldwide with where to stream them
    Best {
        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,

        /// Only titles on this streaming platform (e.g. netflix)
        #[arg(long)]
        platform: Option<String>,

        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// List genre names usable with --genre
    Genres {
        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,
    },

    /// Show one title with its streaming availability
    Details {
        id: u64,

        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,
    },

    /// Search titles by name
    Search {
        query: String,

        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,

        /// Result pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Manage the saved watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },

    /// Interactive session: pick countries, decades and genres from menus
    Explore,

    /// Configure the access token and settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Remove saved data
    #[command(long_about = "Remove saved data. Use --watchlist to delete the watchlist, --credentials to delete the stored access token, or --all for both.")]
    Clear {
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Show saved titles
    List,
    /// Save a title by id
    Add {
        id: u64,
        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,
    },
    /// Remove a saved title
    Remove {
        id: u64,
        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,
    },
    /// Check whether a title is saved
    Contains {
        id: u64,
        #[arg(long, action = ArgAction::SetTrue)]
        shows: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the access token)
    Show {
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a configuration file with every default spelled out
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the TMDb API read access token
    Token {
        /// Token value (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Check that the catalog is reachable with the configured token
    Test,
}

fn kind(shows: bool) -> MediaKind {
    if shows {
        MediaKind::Show
    } else {
        MediaKind::Movie
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let settings = Settings::load()?;

    let log_file = settings.config.logging.file.clone();
    logging::init_logging(cli.verbose, cli.quiet, &settings.config.logging.level, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Countries => countries::run_countries(&output),
        Commands::Browse { country, shows, genres, decade, limit } => {
            let catalog = Catalog::connect(settings)?;
            browse::run_browse(&catalog, kind(shows), &country, &genres, decade, limit, &output).await
        }
        Commands::Best { shows, platform, genres, limit } => {
            let catalog = Catalog::connect(settings)?;
            best::run_best(&catalog, kind(shows), platform.as_deref(), &genres, limit, &output).await
        }
        Commands::Genres { shows } => {
            let catalog = Catalog::connect(settings)?;
            genres::run_genres(&catalog, kind(shows), &output).await
        }
        Commands::Details { id, shows } => {
            let catalog = Catalog::connect(settings)?;
            details::run_details(&catalog, kind(shows), id, &output).await
        }
        Commands::Search { query, shows, pages } => {
            let catalog = Catalog::connect(settings)?;
            search::run_search(&catalog, kind(shows), &query, pages, &output).await
        }
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, settings, &output).await
        }
        Commands::Explore => {
            let catalog = Catalog::connect(settings)?;
            explore::run_explore(&catalog, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, settings, &output).await
        }
        Commands::Clear { all, watchlist, credentials } => clear::run_clear(all, watchlist, credentials, &settings, &output),
    }
}
