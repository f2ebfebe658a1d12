use super::*;
use crate::testing::{raw_movie, raw_show, FakeSource};
use cinemap_models::Decade;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn fast_config(policy: DecadePolicy) -> AggregationConfig {
    AggregationConfig {
        popular_pages: 3,
        top_rated_pages: 2,
        year_range_pages: 1,
        language_pages: 2,
        page_delay_ms: 0,
        year_range_delay_ms: 0,
        decade_policy: policy,
    }
}

fn popular(code: &str) -> CatalogQuery {
    CatalogQuery::by_country(code, SortOrder::Popularity)
}

fn rated(code: &str) -> CatalogQuery {
    CatalogQuery::by_country(code, SortOrder::Rating)
}

fn setup(policy: DecadePolicy) -> (Arc<FakeSource>, Aggregator) {
    let source = Arc::new(FakeSource::new());
    let aggregator = Aggregator::new(source.clone(), &fast_config(policy), IMAGE_BASE);
    (source, aggregator)
}

#[tokio::test]
async fn test_unknown_country_makes_no_requests() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);

    let outcome = aggregator.aggregate_country(MediaKind::Movie, "Atlantis").await;

    assert!(matches!(outcome, AggregationOutcome::UnknownCountry(ref name) if name == "Atlantis"));
    assert!(outcome.into_buckets().is_empty());
    assert_eq!(source.request_count(), 0);
}

#[tokio::test]
async fn test_overlapping_phases_yield_unique_items() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(
        MediaKind::Movie,
        popular("JP"),
        vec![(
            vec![
                raw_movie(1, "1985-04-01", 7.0),
                raw_movie(2, "1995-07-12", 8.0),
                raw_movie(3, "2005-01-30", 6.5),
            ],
            1,
        )],
    );
    let mut overlapping = raw_movie(2, "1995-07-12", 8.0);
    overlapping.title = Some("Later copy".to_string());
    source.set_pages(MediaKind::Movie, rated("JP"), vec![(vec![overlapping], 1)]);

    let outcome = aggregator.aggregate_country(MediaKind::Movie, "Japan").await;

    assert!(outcome.is_ready());
    let buckets = outcome.into_buckets();
    assert_eq!(buckets.total_items(), 3);
    assert_eq!(buckets.get(Decade::Eighties).unwrap().len(), 1);
    assert_eq!(buckets.get(Decade::TwoThousands).unwrap().len(), 1);

    let nineties = buckets.get(Decade::Nineties).unwrap();
    assert_eq!(nineties.len(), 1);
    assert_eq!(nineties[0].title, "Movie 2");
    assert_eq!(nineties[0].rating, "8.0");
}

#[tokio::test]
async fn test_phases_run_in_order() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(MediaKind::Movie, popular("FR"), vec![(vec![raw_movie(1, "1999-01-01", 7.0)], 1)]);

    aggregator.aggregate_country(MediaKind::Movie, "FR").await;

    let queries: Vec<CatalogQuery> = source.requests().into_iter().map(|(_, q, _)| q).collect();
    assert_eq!(queries[0], popular("FR"));
    assert_eq!(queries[1], rated("FR"));
    let ranges: Vec<YearRange> = queries[2..]
        .iter()
        .map(|q| match q {
            CatalogQuery::ByCountryAndYears { range, .. } => *range,
            other => panic!("unexpected query {}", other),
        })
        .collect();
    assert_eq!(ranges.len(), 5);
    assert_eq!(ranges[0], YearRange::new(1980, 1989));
    assert_eq!(ranges[3], YearRange::new(2010, 2019));
    assert_eq!(ranges[4].start, 2020);
}

#[tokio::test]
async fn test_buckets_sorted_by_descending_rating() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(
        MediaKind::Movie,
        popular("KR"),
        vec![(
            vec![
                raw_movie(1, "2012-01-01", 6.0),
                raw_movie(2, "2015-01-01", 8.5),
                raw_movie(3, "2011-01-01", 7.1),
                raw_movie(4, "2018-01-01", 0.0),
            ],
            1,
        )],
    );

    let buckets = aggregator.aggregate_country(MediaKind::Movie, "South Korea").await.into_buckets();

    let ratings: Vec<f64> = buckets.get(Decade::Tens).unwrap().iter().map(|i| i.rating_value()).collect();
    assert_eq!(ratings, vec![8.5, 7.1, 6.0, 0.0]);
    for (_, items) in buckets.iter() {
        assert!(items.windows(2).all(|w| w[0].rating_value() >= w[1].rating_value()));
    }
}

#[tokio::test]
async fn test_pre_1980_item_follows_policy() {
    let pages = vec![(vec![raw_movie(1, "1975-03-01", 7.0), raw_movie(2, "1984-03-01", 7.0)], 1)];

    let (source, cutoff) = setup(DecadePolicy::Cutoff);
    source.set_pages(MediaKind::Movie, popular("IT"), pages.clone());
    let buckets = cutoff.aggregate_country(MediaKind::Movie, "Italy").await.into_buckets();
    assert_eq!(buckets.total_items(), 1);
    assert_eq!(buckets.labels(), Decade::MODERN.to_vec());

    let (source, inclusive) = setup(DecadePolicy::IncludeEarlier);
    source.set_pages(MediaKind::Movie, popular("IT"), pages);
    let buckets = inclusive.aggregate_country(MediaKind::Movie, "Italy").await.into_buckets();
    assert_eq!(buckets.total_items(), 2);
    assert_eq!(buckets.get(Decade::Earlier).unwrap()[0].id, 1);
}

#[tokio::test]
async fn test_cached_result_makes_no_requests() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(MediaKind::Movie, popular("DE"), vec![(vec![raw_movie(1, "1999-01-01", 7.0)], 1)]);

    let first = aggregator.aggregate_country(MediaKind::Movie, "Germany").await;
    let requests = source.request_count();
    assert!(requests > 0);
    assert!(aggregator.cache().has("movies:country_DE"));

    let second = aggregator.aggregate_country(MediaKind::Movie, "de").await;
    assert_eq!(source.request_count(), requests);
    assert_eq!(first.into_buckets(), second.into_buckets());

    // the other media kind has its own entry
    aggregator.aggregate_country(MediaKind::Show, "Germany").await;
    assert!(source.request_count() > requests);
    assert!(aggregator.cache().has("shows:country_DE"));
}

#[tokio::test]
async fn test_language_fallback_only_when_empty() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(
        MediaKind::Show,
        CatalogQuery::by_language("ja"),
        vec![(vec![raw_show(10, "2003-10-01", 8.1)], 1)],
    );

    let outcome = aggregator.aggregate_country(MediaKind::Show, "JP").await;

    assert!(outcome.is_ready());
    let buckets = outcome.into_buckets();
    assert_eq!(buckets.get(Decade::TwoThousands).unwrap()[0].title, "Show 10");
    let last = source.requests().pop().unwrap();
    assert_eq!(last.1, CatalogQuery::by_language("ja"));

    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(MediaKind::Show, popular("JP"), vec![(vec![raw_show(11, "2013-10-01", 8.1)], 1)]);
    aggregator.aggregate_country(MediaKind::Show, "JP").await;
    assert!(source
        .requests()
        .iter()
        .all(|(_, q, _)| !matches!(q, CatalogQuery::ByLanguage { .. })));
}

#[tokio::test]
async fn test_no_data_without_fallback_language() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);

    let outcome = aggregator.aggregate_country(MediaKind::Movie, "Chile").await;

    assert!(matches!(outcome, AggregationOutcome::NoData(_)));
    // popularity, rating and five year ranges, one empty page each
    assert_eq!(source.request_count(), 7);
    assert!(aggregator.cache().has("movies:country_CL"));
}

#[tokio::test]
async fn test_total_failure_is_reported_and_not_cached() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.fail_all_pages();

    let outcome = aggregator.aggregate_country(MediaKind::Movie, "France").await;

    assert!(outcome.is_failed());
    assert!(outcome.into_buckets().is_empty());
    assert!(!aggregator.cache().has("movies:country_FR"));

    let before = source.request_count();
    aggregator.aggregate_country(MediaKind::Movie, "France").await;
    assert!(source.request_count() > before);
}

#[tokio::test]
async fn test_failure_after_newer_selection_reports_superseded() {
    let (_source, aggregator) = setup(DecadePolicy::Cutoff);
    let japan = aggregator.selection.begin("movies:country_JP", None);
    let _korea = aggregator.selection.begin("movies:country_KR", None);

    let outcome = aggregator.finish(
        &japan,
        AggregationOutcome::Failed {
            buckets: Arc::new(DecadeBuckets::default()),
            reason: "all 3 requests failed".to_string(),
        },
    );

    assert!(outcome.is_superseded());
}

#[tokio::test]
async fn test_partial_failure_still_aggregates() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    source.set_pages(MediaKind::Movie, popular("ES"), vec![(vec![raw_movie(1, "1999-01-01", 7.0)], 1)]);
    source.fail_page(MediaKind::Movie, rated("ES"), 1);

    let outcome = aggregator.aggregate_country(MediaKind::Movie, "Spain").await;

    assert!(outcome.is_ready());
    assert_eq!(outcome.into_buckets().total_items(), 1);
}

#[tokio::test]
async fn test_switching_country_supersedes_running_aggregation() {
    let source = Arc::new(FakeSource::new());
    let aggregator = Aggregator::new(source.clone(), &fast_config(DecadePolicy::Cutoff), IMAGE_BASE);
    let _gate = source.hold(MediaKind::Movie, popular("JP"));
    source.set_pages(MediaKind::Movie, popular("KR"), vec![(vec![raw_movie(1, "2019-05-30", 8.5)], 1)]);

    let (japan, korea) = tokio::join!(aggregator.aggregate_country(MediaKind::Movie, "Japan"), async {
        source.held_request_started.notified().await;
        aggregator.aggregate_country(MediaKind::Movie, "South Korea").await
    });

    assert!(japan.is_superseded());
    assert!(japan.into_buckets().is_empty());
    assert!(korea.is_ready());
    assert!(!aggregator.cache().has("movies:country_JP"));
    assert!(aggregator.cache().has("movies:country_KR"));
}

#[tokio::test]
async fn test_caller_token_cancels_aggregation() {
    let (source, aggregator) = setup(DecadePolicy::Cutoff);
    let token = CancellationToken::new();
    token.cancel();

    let outcome = aggregator.aggregate_country_with(MediaKind::Movie, "Japan", &token).await;

    assert!(outcome.is_superseded());
    assert_eq!(source.request_count(), 0);
}

#[test]
fn test_year_ranges_end_at_current_year() {
    let ranges = Aggregator::year_ranges(2026);
    assert_eq!(ranges.first(), Some(&YearRange::new(1980, 1989)));
    assert_eq!(ranges.last(), Some(&YearRange::new(2020, 2026)));
}
