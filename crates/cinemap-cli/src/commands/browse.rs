use super::cancel_on_ctrl_c;
use super::context::Catalog;
use super::ui::Spinner;
use crate::output::Output;
use cinemap_core::AggregationOutcome;
use cinemap_models::{Country, Decade, DecadeBuckets, MediaKind};
use color_eyre::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub async fn run_browse(
    catalog: &Catalog,
    kind: MediaKind,
    country: &str,
    genres: &[String],
    decade: Option<Decade>,
    limit: usize,
    output: &Output,
) -> Result<()> {
    if let Some(decade) = decade {
        let policy = catalog.aggregator.policy();
        if !policy.includes(decade) {
            return Err(color_eyre::eyre::eyre!(
                "Titles before 1980 are not collected. Pick one of {} or set aggregation.decade_policy = \"include_earlier\"",
                Decade::MODERN.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
            ));
        }
    }

    let cancel = cancel_on_ctrl_c();
    let Some(buckets) = collect(catalog, kind, country, &cancel, output).await? else {
        return Ok(());
    };

    let filtered = catalog.genres.filter(kind, &buckets, genres).await;
    let shown = match decade {
        Some(decade) => filtered.only(decade),
        None => filtered,
    };

    if shown.is_empty() {
        output.info("No titles match the selected filters");
    }
    output.buckets(&shown, limit);
    Ok(())
}

/// Run the aggregation behind a spinner and report every non-ready outcome.
///
/// `Ok(None)` means there is nothing to show and the reason was already
/// printed.
pub async fn collect(
    catalog: &Catalog,
    kind: MediaKind,
    country: &str,
    cancel: &CancellationToken,
    output: &Output,
) -> Result<Option<Arc<DecadeBuckets>>> {
    let label = Country::lookup(country).map(|c| c.name).unwrap_or(country);
    let spinner = Spinner::start(output, format!("Collecting {} from {}", kind.plural(), label));
    let outcome = catalog.aggregator.aggregate_country_with(kind, country, cancel).await;
    spinner.finish();

    match outcome {
        AggregationOutcome::Ready(buckets) => {
            output.heading(format!("{} from {}: {} titles", kind.plural(), label, buckets.total_items()));
            Ok(Some(buckets))
        }
        AggregationOutcome::NoData(_) => {
            output.warn(format!("No {} found for {}", kind.plural(), label));
            Ok(None)
        }
        AggregationOutcome::Failed { reason, .. } => Err(color_eyre::eyre::eyre!(
            "Could not load {} for {}: {}. Check your connection and token (`cinemap config test`)",
            kind.plural(),
            label,
            reason
        )),
        AggregationOutcome::UnknownCountry(name) => Err(color_eyre::eyre::eyre!(
            "Unknown country '{}'. Run `cinemap countries` to see the supported list",
            name
        )),
        AggregationOutcome::Superseded => {
            output.warn("Cancelled");
            Ok(None)
        }
    }
}
