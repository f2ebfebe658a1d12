use super::context::Catalog;
use crate::output::{styled_table, Output};
use cinemap_models::{CatalogKey, MediaKind};
use comfy_table::Cell;
use color_eyre::Result;
use serde_json::json;

pub async fn run_details(catalog: &Catalog, kind: MediaKind, id: u64, output: &Output) -> Result<()> {
    let item = catalog
        .lookup
        .details(kind, id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load {} {}: {}", kind, id, e))?
        .ok_or_else(|| color_eyre::eyre::eyre!("No {} with id {}", kind, id))?;

    // availability is optional; a failed lookup only hides the row
    let providers = catalog.source.fetch_watch_providers(kind, id).await.ok().flatten();
    let platforms = providers
        .as_ref()
        .map(|p| p.platforms(catalog.streaming.preferred_regions()))
        .unwrap_or_default();

    let genre_names: Vec<String> = match catalog.genres.genre_map(kind).await {
        Some(map) => item
            .genre_ids
            .iter()
            .filter_map(|id| map.name_for(*id).map(str::to_string))
            .collect(),
        None => Vec::new(),
    };
    let saved = catalog.settings.watchlist().contains(CatalogKey::new(kind, id));

    if !output.is_human() {
        output.json(&json!({
            "item": item,
            "genres": genre_names,
            "streaming": platforms,
            "providers": providers,
            "on_watchlist": saved,
        }));
        return Ok(());
    }

    let title = item.display_title();
    let mut table = styled_table(&[title.as_str(), ""]);
    if let Some(ref original) = item.original_title {
        if *original != item.title {
            table.add_row(vec![Cell::new("Original title"), Cell::new(original)]);
        }
    }
    table.add_row(vec![Cell::new("Released"), Cell::new(item.release_date.as_deref().unwrap_or("-"))]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{} ({} votes)", item.rating, item.vote_count)),
    ]);
    if !genre_names.is_empty() {
        table.add_row(vec![Cell::new("Genres"), Cell::new(genre_names.join(", "))]);
    }
    if let Some(ref language) = item.original_language {
        table.add_row(vec![Cell::new("Language"), Cell::new(language)]);
    }
    table.add_row(vec![
        Cell::new("Streaming"),
        Cell::new(if platforms.is_empty() { "-".to_string() } else { platforms.join(", ") }),
    ]);
    if let Some(ref poster) = item.poster_url {
        table.add_row(vec![Cell::new("Poster"), Cell::new(poster)]);
    }
    table.add_row(vec![Cell::new("On watchlist"), Cell::new(if saved { "yes" } else { "no" })]);
    output.table(&table);

    if let Some(ref overview) = item.overview {
        output.info(format!("\n{}", overview));
    }
    Ok(())
}
