use super::context::Settings;
use super::prompts::prompt_yes_no;
use super::ui::is_interactive;
use crate::output::Output;
use color_eyre::Result;
use std::fs;
use std::path::Path;

pub fn run_clear(all: bool, watchlist: bool, credentials: bool, settings: &Settings, output: &Output) -> Result<()> {
    if !(all || watchlist || credentials) {
        output.warn("No clear option specified. Use --watchlist, --credentials, or --all");
        output.info("\nExample: cinemap clear --watchlist");
        return Ok(());
    }

    if all && is_interactive() && output.is_human() && !prompt_yes_no("Remove the watchlist and the stored access token?", false)? {
        output.info("Nothing removed");
        return Ok(());
    }

    if all || watchlist {
        remove_file(&settings.paths.watchlist_file(), "watchlist", output)?;
    }
    if all || credentials {
        remove_file(&settings.paths.credentials_file(), "credentials", output)?;
    }
    Ok(())
}

fn remove_file(path: &Path, what: &str, output: &Output) -> Result<()> {
    if !path.exists() {
        output.info(format!("No {} file found to clear", what));
        return Ok(());
    }

    fs::remove_file(path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to remove {} at {}: {}", what, path.display(), e))?;
    output.success(format!("Cleared {}: {}", what, path.display()));
    Ok(())
}
