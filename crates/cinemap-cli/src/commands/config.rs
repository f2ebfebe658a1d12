use super::context::{Catalog, Settings};
use super::prompts;
use super::ui::Spinner;
use crate::output::Output;
use crate::ConfigCommands;
use cinemap_config::{mask_secret, Config, ACCESS_TOKEN_ENV};
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, settings: Settings, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(&settings, full, output),
        ConfigCommands::Init { force } => init_config(&settings, force, output),
        ConfigCommands::Token { token } => configure_token(&settings, token, output),
        ConfigCommands::Test => test_connection(settings, output).await,
    }
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn row(table: &mut Table, name: &str, value: impl ToString) {
    table.add_row(vec![Cell::new(name), Cell::new(value.to_string())]);
}

fn show_config(settings: &Settings, full: bool, output: &Output) -> Result<()> {
    let config = &settings.config;
    let config_file = settings.paths.config_file();
    let credentials = settings.credentials()?;

    let from_env = std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
    let token = credentials.resolve_access_token();
    let token_display = match token {
        Some(ref t) if full => t.clone(),
        Some(ref t) => mask_secret(t),
        None => "not set".to_string(),
    };
    let token_origin = if from_env.is_some() { ACCESS_TOKEN_ENV } else { "credentials file" };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "credentials_file": credentials.path(),
            "watchlist_file": settings.paths.watchlist_file(),
            "token": token_display,
            "token_source": token.as_ref().map(|_| token_origin),
            "config": config,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut files = section("Files");
    let config_state = if config_file.exists() {
        config_file.display().to_string()
    } else {
        format!("{} {}", config_file.display(), "(not created, using defaults)".bright_black())
    };
    row(&mut files, "Config", config_state);
    row(&mut files, "Credentials", credentials.path().display());
    row(&mut files, "Watchlist", settings.paths.watchlist_file().display());
    println!("{}\n", files);

    let mut tmdb = section("TMDb");
    row(&mut tmdb, "API", &config.tmdb.base_url);
    row(&mut tmdb, "Images", &config.tmdb.image_base_url);
    row(&mut tmdb, "Timeout", format!("{} seconds", config.tmdb.timeout_seconds));
    row(&mut tmdb, "Language", config.tmdb.language.as_deref().unwrap_or("-"));
    let token_cell = match token {
        Some(_) => format!("{} ({})", token_display, token_origin),
        None => "✗ not set".red().to_string(),
    };
    row(&mut tmdb, "Access token", token_cell);
    if let Some(saved_at) = credentials.get_tmdb_token_saved_at() {
        row(&mut tmdb, "Token saved", saved_at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("{}\n", tmdb);

    let agg = &config.aggregation;
    let mut aggregation = section("Country browsing");
    row(&mut aggregation, "Popular pages", agg.popular_pages);
    row(&mut aggregation, "Top rated pages", agg.top_rated_pages);
    row(&mut aggregation, "Pages per decade", agg.year_range_pages);
    row(&mut aggregation, "Language fallback pages", agg.language_pages);
    row(&mut aggregation, "Page delay", format!("{} ms", agg.page_delay_ms));
    row(&mut aggregation, "Decade page delay", format!("{} ms", agg.year_range_delay_ms));
    row(&mut aggregation, "Decade policy", format!("{:?}", agg.decade_policy));
    println!("{}\n", aggregation);

    let mut streaming = section("Streaming picks");
    row(&mut streaming, "Top rated pages", config.streaming.top_rated_pages);
    row(&mut streaming, "Trending pages", config.streaming.trending_pages);
    row(&mut streaming, "Regions", config.streaming.preferred_regions.join(", "));
    println!("{}", streaming);
    Ok(())
}

fn init_config(settings: &Settings, force: bool, output: &Output) -> Result<()> {
    let config_file = settings.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!("{} already exists; use --force to overwrite it", config_file.display()));
        return Ok(());
    }

    settings
        .paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn configure_token(settings: &Settings, token: Option<String>, output: &Output) -> Result<()> {
    let token = match token {
        Some(t) => t.trim().to_string(),
        None => {
            if output.is_human() {
                output.info("Create a read access token at https://www.themoviedb.org/settings/api");
            }
            prompts::prompt_secret("TMDb API read access token")?
        }
    };

    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Token cannot be empty"));
    }

    let mut credentials = settings.credentials()?;
    credentials.set_tmdb_access_token(token);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Access token saved to {}", credentials.path().display()));
    if std::env::var(ACCESS_TOKEN_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the saved token", ACCESS_TOKEN_ENV));
    }
    Ok(())
}

async fn test_connection(settings: Settings, output: &Output) -> Result<()> {
    let catalog = Catalog::connect(settings)?;

    let spinner = Spinner::start(output, "Contacting TMDb");
    let result = catalog.source.test_connection().await;
    spinner.finish();

    match result {
        Ok(()) => {
            output.success(format!("Connected to {}", catalog.settings.config.tmdb.base_url));
            Ok(())
        }
        Err(e) if e.is_unauthorized() => Err(color_eyre::eyre::eyre!(
            "The access token was rejected ({}). Run `cinemap config token` to replace it",
            e
        )),
        Err(e) => Err(color_eyre::eyre::eyre!("Connection test failed: {}", e)),
    }
}
