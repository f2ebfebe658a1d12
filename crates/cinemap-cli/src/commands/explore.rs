use super::browse::collect;
use super::context::Catalog;
use super::prompts::{prompt_fuzzy, prompt_multi, prompt_select, prompt_string};
use super::ui::{is_interactive, Spinner};
use super::cancel_on_ctrl_c;
use crate::output::Output;
use cinemap_core::{filter_picks, StreamingError};
use cinemap_models::{CatalogItem, Decade, DecadeBuckets, MediaKind, COUNTRIES};
use color_eyre::Result;

const ROWS: usize = 10;

struct Session {
    kind: MediaKind,
    genres: Vec<String>,
}

/// Menu-driven browsing. Results stay cached for the whole session, so
/// returning to a country is instant.
pub async fn run_explore(catalog: &Catalog, output: &Output) -> Result<()> {
    if !is_interactive() || !output.is_human() {
        return Err(color_eyre::eyre::eyre!("explore needs an interactive terminal and human output"));
    }

    let mut session = Session {
        kind: MediaKind::Movie,
        genres: Vec::new(),
    };

    loop {
        let genre_label = if session.genres.is_empty() {
            "all".to_string()
        } else {
            session.genres.join(", ")
        };
        let other = match session.kind {
            MediaKind::Movie => MediaKind::Show,
            MediaKind::Show => MediaKind::Movie,
        };
        let menu = [
            format!("Browse a country's {}", session.kind.plural()),
            format!("Best {} worldwide", session.kind.plural()),
            format!("Search {} by title", session.kind.plural()),
            format!("Genres: {}", genre_label),
            format!("Switch to {}", other.plural()),
            "Watchlist".to_string(),
            "Quit".to_string(),
        ];

        match prompt_select("What next?", &menu, 0)? {
            Some(0) => browse_country(catalog, &session, output).await?,
            Some(1) => best_worldwide(catalog, &session, output).await?,
            Some(2) => search_titles(catalog, &session, output).await?,
            Some(3) => choose_genres(catalog, &mut session).await?,
            Some(4) => {
                session.kind = other;
                session.genres.clear();
            }
            Some(5) => {
                let store = catalog.settings.watchlist();
                output.heading(format!("Watchlist ({} titles)", store.len()));
                output.watchlist(store.entries());
            }
            _ => return Ok(()),
        }
    }
}

async fn browse_country(catalog: &Catalog, session: &Session, output: &Output) -> Result<()> {
    let names: Vec<&str> = COUNTRIES.iter().map(|c| c.name).collect();
    let Some(index) = prompt_fuzzy("Country", &names)? else {
        return Ok(());
    };
    let country = COUNTRIES[index].code;

    let cancel = cancel_on_ctrl_c();
    let collected = collect(catalog, session.kind, country, &cancel, output).await;
    // stops the Ctrl-C listener
    cancel.cancel();
    let Some(buckets) = collected? else {
        return Ok(());
    };

    let filtered = catalog.genres.filter(session.kind, &buckets, &session.genres).await;
    let mut shown = filtered.clone();
    loop {
        output.buckets(&shown, ROWS);

        let menu = ["Pick a decade", "Show all decades", "Save a title to the watchlist", "Back"];
        match prompt_select("Now", &menu, 0)? {
            Some(0) => {
                let decades: Vec<Decade> = filtered.labels();
                if let Some(i) = prompt_select("Decade", &decades, decades.len().saturating_sub(1))? {
                    shown = filtered.only(decades[i]);
                }
            }
            Some(1) => shown = filtered.clone(),
            Some(2) => save_item(catalog, &shown, output)?,
            _ => return Ok(()),
        }
    }
}

fn save_item(catalog: &Catalog, buckets: &DecadeBuckets, output: &Output) -> Result<()> {
    let items: Vec<&CatalogItem> = buckets
        .iter()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .flat_map(|(_, items)| items.iter().take(ROWS))
        .collect();
    if items.is_empty() {
        output.info("Nothing to save");
        return Ok(());
    }

    let labels: Vec<String> = items
        .iter()
        .map(|i| format!("{} ★ {}", i.display_title(), i.rating))
        .collect();
    if let Some(i) = prompt_fuzzy("Title", &labels)? {
        let mut store = catalog.settings.watchlist();
        if store.add(items[i].clone())? {
            output.success(format!("Added {} to your watchlist", items[i].display_title()));
        } else {
            output.info(format!("{} is already on your watchlist", items[i].display_title()));
        }
    }
    Ok(())
}

async fn best_worldwide(catalog: &Catalog, session: &Session, output: &Output) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    let spinner = Spinner::start(output, format!("Ranking {} and checking streaming platforms", session.kind.plural()));
    let result = catalog.streaming.best_globally(session.kind, &cancel).await;
    spinner.finish();
    cancel.cancel();

    let picks = match result {
        Ok(picks) => picks,
        Err(StreamingError::Cancelled) => return Ok(()),
        Err(e) => {
            output.error(format!("Could not load the best {}: {}", session.kind.plural(), e));
            return Ok(());
        }
    };

    let genre_ids = catalog.genres.resolve(session.kind, &session.genres).await;
    let regions = catalog.streaming.preferred_regions();
    let shown = filter_picks(&picks, None, &genre_ids, regions);
    output.heading(format!("Best {} worldwide", session.kind.plural()));
    output.picks(&shown, regions, 20);
    Ok(())
}

async fn search_titles(catalog: &Catalog, session: &Session, output: &Output) -> Result<()> {
    let query = prompt_string("Title", None)?;
    if query.trim().is_empty() {
        return Ok(());
    }

    let cancel = cancel_on_ctrl_c();
    let spinner = Spinner::start(output, format!("Searching {} for \"{}\"", session.kind.plural(), query.trim()));
    let result = catalog.lookup.search(session.kind, &query, 1, &cancel).await;
    spinner.finish();
    cancel.cancel();

    let Ok(items) = result else {
        return Ok(());
    };
    if items.is_empty() {
        output.info(format!("No {} found for \"{}\"", session.kind.plural(), query.trim()));
        return Ok(());
    }

    output.items(&items, ROWS);
    let labels: Vec<String> = items.iter().take(ROWS).map(|i| i.display_title()).collect();
    if let Some(i) = prompt_fuzzy("Save to the watchlist (Esc to skip)", &labels)? {
        let mut store = catalog.settings.watchlist();
        if store.add(items[i].clone())? {
            output.success(format!("Added {} to your watchlist", items[i].display_title()));
        } else {
            output.info(format!("{} is already on your watchlist", items[i].display_title()));
        }
    }
    Ok(())
}

async fn choose_genres(catalog: &Catalog, session: &mut Session) -> Result<()> {
    let available = catalog.genres.available_genres(session.kind).await;
    if available.is_empty() {
        return Err(color_eyre::eyre::eyre!("Could not load the {} genre list", session.kind));
    }

    let names: Vec<&str> = available.iter().map(|g| g.name.as_str()).collect();
    let checked: Vec<bool> = names
        .iter()
        .map(|n| session.genres.iter().any(|s| s.eq_ignore_ascii_case(n)))
        .collect();
    let picked = prompt_multi("Genres (space to toggle, enter to confirm)", &names, &checked)?;
    session.genres = picked.into_iter().map(|i| names[i].to_string()).collect();
    Ok(())
}
