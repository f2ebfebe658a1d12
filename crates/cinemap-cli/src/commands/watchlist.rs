use super::context::{Catalog, Settings};
use crate::output::Output;
use crate::WatchlistCommands;
use cinemap_models::{CatalogKey, MediaKind};
use color_eyre::Result;
use serde_json::json;

pub async fn run_watchlist(cmd: WatchlistCommands, settings: Settings, output: &Output) -> Result<()> {
    match cmd {
        WatchlistCommands::List => list(&settings, output),
        WatchlistCommands::Add { id, shows } => add(settings, crate::kind(shows), id, output).await,
        WatchlistCommands::Remove { id, shows } => remove(&settings, crate::kind(shows), id, output),
        WatchlistCommands::Contains { id, shows } => contains(&settings, crate::kind(shows), id, output),
    }
}

fn list(settings: &Settings, output: &Output) -> Result<()> {
    let store = settings.watchlist();
    if store.is_empty() && output.is_human() {
        output.info("Your watchlist is empty. Add titles with `cinemap watchlist add <ID>`");
        return Ok(());
    }
    output.heading(format!("Watchlist ({} titles)", store.len()));
    output.watchlist(store.entries());
    Ok(())
}

async fn add(settings: Settings, kind: MediaKind, id: u64, output: &Output) -> Result<()> {
    let key = CatalogKey::new(kind, id);
    if settings.watchlist().contains(key) {
        output.info(format!("{} is already on your watchlist", key));
        return Ok(());
    }

    let catalog = Catalog::connect(settings)?;
    let item = catalog
        .lookup
        .details(kind, id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load {} {}: {}", kind, id, e))?
        .ok_or_else(|| color_eyre::eyre::eyre!("No {} with id {}", kind, id))?;

    let title = item.display_title();
    let mut store = catalog.settings.watchlist();
    if store.add(item)? {
        output.success(format!("Added {} to your watchlist", title));
    } else {
        output.info(format!("{} is already on your watchlist", title));
    }
    Ok(())
}

fn remove(settings: &Settings, kind: MediaKind, id: u64, output: &Output) -> Result<()> {
    let mut store = settings.watchlist();
    let key = CatalogKey::new(kind, id);
    let title = store.get(key).map(|e| e.item.display_title()).unwrap_or_else(|| key.to_string());

    if store.remove(key)? {
        output.success(format!("Removed {} from your watchlist", title));
    } else {
        output.warn(format!("{} is not on your watchlist", key));
    }
    Ok(())
}

fn contains(settings: &Settings, kind: MediaKind, id: u64, output: &Output) -> Result<()> {
    let key = CatalogKey::new(kind, id);
    let saved = settings.watchlist().contains(key);

    if output.is_human() {
        output.info(if saved {
            format!("{} is on your watchlist", key)
        } else {
            format!("{} is not on your watchlist", key)
        });
    } else {
        output.json(&json!({"kind": kind, "id": id, "on_watchlist": saved}));
    }
    Ok(())
}
