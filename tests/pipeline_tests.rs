mod support;

use chrono::{TimeZone, Timelike};
use chrono_tz::America::New_York;
use eventboard::components::departure::{DepartureCalculator, TravelEstimate};
use eventboard::components::estimate_store::{EstimateStore, MemoryEstimateStore};
use eventboard::components::event_feed::Column;
use eventboard::components::widgets::{evaluate, CycleOutcome, EventPipeline};
use std::sync::Arc;
use support::{noon, sample_feed, StaticFeed, HEADER};

fn pipeline(feed: StaticFeed, store: MemoryEstimateStore) -> EventPipeline {
    EventPipeline::new(Arc::new(feed), Arc::new(store), DepartureCalculator::default(), New_York)
}

#[test]
fn test_evaluate_picks_last_row_for_today() {
    let now = noon().with_timezone(&New_York);
    let estimate = TravelEstimate::from_display("1 hr 5 min");
    let outcome = evaluate(&sample_feed(), now, Some(&estimate), &DepartureCalculator::default());

    let event = outcome.event.expect("today's event");
    assert_eq!(event.get(Column::EventName), Some("Smith Wedding, Reception"));
    assert_eq!(
        outcome.start,
        Some(New_York.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap())
    );

    // 120 + 65 + 5 + 15 minutes before 6 PM
    let departure = outcome.departure.expect("departure");
    assert_eq!((departure.instant.hour(), departure.instant.minute()), (14, 35));
    assert_eq!(departure.display, "2:35 PM");
}

#[test]
fn test_evaluate_without_estimate_has_no_departure() {
    let now = noon().with_timezone(&New_York);
    let outcome = evaluate(&sample_feed(), now, None, &DepartureCalculator::default());

    assert!(outcome.event.is_some());
    assert!(outcome.start.is_some());
    assert_eq!(outcome.departure, None);
}

#[test]
fn test_evaluate_without_row_for_today() {
    let tomorrow = New_York.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap();
    let estimate = TravelEstimate::from_display("45 min");
    let outcome = evaluate(&sample_feed(), tomorrow, Some(&estimate), &DepartureCalculator::default());

    assert_eq!(outcome.event, None);
    assert_eq!(outcome.start, None);
    assert_eq!(outcome.departure, None);
}

#[test]
fn test_evaluate_falls_back_to_earliest_schedule_column() {
    let feed = format!(
        "{}\n10/19/2026,Gala,Hall,250,,6:00 PM,5:30 PM,5:45 PM,Yes,,1 Main St,Irmo,SC,29063",
        HEADER
    );
    let now = noon().with_timezone(&New_York);
    let estimate = TravelEstimate::from_display("45 min");
    let outcome = evaluate(&feed, now, Some(&estimate), &DepartureCalculator::default());

    assert_eq!(
        outcome.start,
        Some(New_York.with_ymd_and_hms(2026, 10, 19, 17, 30, 0).unwrap())
    );
    // 120 + 45 + 5 + 45 minutes before 5:30 PM
    assert_eq!(outcome.departure.expect("departure").display, "1:55 PM");
}

#[test]
fn test_evaluate_with_oversized_guest_count() {
    let feed = "Date,Event Name,Guest Count,Event Start Time\n10/19/2026,Gala,500000000000,7:00 PM\n";
    let now = noon().with_timezone(&New_York);
    let estimate = TravelEstimate::from_display("45 min");
    let outcome = evaluate(feed, now, Some(&estimate), &DepartureCalculator::default());

    // The row and start still resolve, only the departure is dropped
    assert!(outcome.event.is_some());
    assert_eq!(
        outcome.start,
        Some(New_York.with_ymd_and_hms(2026, 10, 19, 19, 0, 0).unwrap())
    );
    assert_eq!(outcome.departure, None);

    let feed = "Date,Event Name,Guest Count,Event Start Time\n10/19/2026,Gala,9223372036854775807,7:00 PM\n";
    let outcome = evaluate(feed, now, Some(&estimate), &DepartureCalculator::default());
    assert_eq!(outcome.departure, None);
}

#[test]
fn test_evaluate_on_empty_feed() {
    let now = noon().with_timezone(&New_York);
    let outcome = evaluate("", now, None, &DepartureCalculator::default());
    assert_eq!(outcome, CycleOutcome::default());
}

#[tokio::test]
async fn test_pipeline_reads_shared_estimate() {
    let store = MemoryEstimateStore::new();
    let pipeline = pipeline(StaticFeed::new(sample_feed()), store.clone());

    assert_eq!(pipeline.run_cycle(noon()).await.departure, None);

    store.set(TravelEstimate::from_display("45 min")).await.unwrap();
    let outcome = pipeline.run_cycle(noon()).await;
    assert_eq!(outcome.departure.expect("departure").display, "2:55 PM");
}

#[tokio::test]
async fn test_pipeline_is_idempotent() {
    let store = MemoryEstimateStore::new();
    store.set(TravelEstimate::from_display("1 hr 5 min")).await.unwrap();
    let feed = StaticFeed::new(sample_feed());
    let pipeline = pipeline(feed.clone(), store);

    let first = pipeline.run_cycle(noon()).await;
    let second = pipeline.run_cycle(noon()).await;

    assert_eq!(first, second);
    assert_eq!(first.departure, second.departure);
    assert_eq!(feed.fetches(), 2);
}

#[tokio::test]
async fn test_fetch_today_follows_feed_changes() {
    let feed = StaticFeed::new(sample_feed());
    let pipeline = pipeline(feed.clone(), MemoryEstimateStore::new());

    let event = pipeline.fetch_today(noon()).await.expect("event");
    assert_eq!(event.get(Column::VenueName), Some("Riverside Barn"));

    feed.replace(HEADER).await;
    assert_eq!(pipeline.fetch_today(noon()).await, None);
}
