use super::cancel_on_ctrl_c;
use super::context::Catalog;
use super::ui::Spinner;
use crate::output::Output;
use cinemap_core::{filter_picks, StreamingError};
use cinemap_models::MediaKind;
use color_eyre::Result;

pub async fn run_best(
    catalog: &Catalog,
    kind: MediaKind,
    platform: Option<&str>,
    genres: &[String],
    limit: usize,
    output: &Output,
) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    let spinner = Spinner::start(output, format!("Ranking {} and checking streaming platforms", kind.plural()));
    let result = catalog.streaming.best_globally(kind, &cancel).await;
    spinner.finish();

    let picks = match result {
        Ok(picks) => picks,
        Err(StreamingError::Cancelled) => {
            output.warn("Cancelled");
            return Ok(());
        }
        Err(e) => return Err(color_eyre::eyre::eyre!("Could not load the best {}: {}", kind.plural(), e)),
    };

    let genre_ids = catalog.genres.resolve(kind, genres).await;
    if !genres.is_empty() && genre_ids.is_empty() {
        output.warn(format!("None of {:?} is a known genre, showing all genres", genres));
    }

    let regions = catalog.streaming.preferred_regions();
    let shown = filter_picks(&picks, platform, &genre_ids, regions);
    if shown.is_empty() {
        output.info("No titles match the selected filters");
        return Ok(());
    }

    output.heading(format!("Best {} worldwide ({} titles)", kind.plural(), shown.len()));
    output.picks(&shown, regions, limit);
    Ok(())
}
