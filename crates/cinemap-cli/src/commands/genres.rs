use super::context::Catalog;
use crate::output::{styled_table, Output};
use cinemap_models::MediaKind;
use comfy_table::Cell;
use color_eyre::Result;

pub async fn run_genres(catalog: &Catalog, kind: MediaKind, output: &Output) -> Result<()> {
    let genres = catalog.genres.available_genres(kind).await;
    if genres.is_empty() {
        return Err(color_eyre::eyre::eyre!("Could not load the {} genre list", kind));
    }

    if !output.is_human() {
        output.json(&serde_json::to_value(&genres)?);
        return Ok(());
    }

    let mut table = styled_table(&["Id", "Genre"]);
    for genre in &genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    output.table(&table);
    Ok(())
}
