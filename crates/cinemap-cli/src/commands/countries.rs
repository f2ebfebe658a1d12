use crate::output::{styled_table, Output};
use cinemap_models::COUNTRIES;
use comfy_table::Cell;
use color_eyre::Result;
use serde_json::json;

pub fn run_countries(output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&json!(COUNTRIES));
        return Ok(());
    }

    let mut table = styled_table(&["Country", "Code", "Fallback language"]);
    for country in COUNTRIES {
        table.add_row(vec![
            Cell::new(country.name),
            Cell::new(country.code),
            Cell::new(country.fallback_language.unwrap_or("-")),
        ]);
    }
    output.table(&table);
    output.info(format!("{} countries", COUNTRIES.len()));
    Ok(())
}
