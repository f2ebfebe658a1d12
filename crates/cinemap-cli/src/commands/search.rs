use super::cancel_on_ctrl_c;
use super::context::Catalog;
use super::ui::Spinner;
use crate::output::Output;
use cinemap_models::MediaKind;
use color_eyre::Result;

pub async fn run_search(catalog: &Catalog, kind: MediaKind, query: &str, pages: u32, output: &Output) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    let spinner = Spinner::start(output, format!("Searching {} for \"{}\"", kind.plural(), query));
    let result = catalog.lookup.search(kind, query, pages.max(1), &cancel).await;
    spinner.finish();

    let Ok(items) = result else {
        output.warn("Cancelled");
        return Ok(());
    };

    if items.is_empty() {
        output.info(format!("No {} found for \"{}\"", kind.plural(), query));
        return Ok(());
    }

    output.items(&items, items.len());
    output.info(format!("Add one with `cinemap watchlist add <ID>{}`", if kind == MediaKind::Show { " --shows" } else { "" }));
    Ok(())
}
