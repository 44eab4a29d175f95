//! Batch scan behavior: isolation, timeouts, deadline, lifecycle, cache.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use rust_decimal_macros::dec;
use surebet::adapter::outbound::MemoryOpportunityCache;
use surebet::application::ScanRequest;
use surebet::domain::{EventId, EventInfo, MarketId, MarketType, OpportunityStatus};
use surebet::port::outbound::{cache_key, Clock, OpportunityCache};
use surebet::testkit::domain::{
    before_kickoff, event, fair_market, kickoff, priced, two_way_arbitrage,
};
use surebet::testkit::provider::ScriptedProvider;

use support::scan::{settings, Harness};

#[tokio::test]
async fn ranks_opportunities_across_events() {
    let harness = Harness::new(
        ScriptedProvider::new()
            .with_snapshot(two_way_arbitrage("evt-1"))
            .with_snapshot(priced("evt-2", dec!(2.20), dec!(2.10)))
            .with_snapshot(fair_market("evt-3")),
    );

    let report = harness.scanner(settings()).scan(&ScanRequest::default()).await;

    assert_eq!(report.events_scanned, 3);
    assert_eq!(report.opportunities.len(), 3);
    assert_eq!(report.opportunities[0].event_id().as_str(), "evt-2");
    let margins: Vec<_> = report
        .opportunities
        .iter()
        .map(|o| o.profit_margin())
        .collect();
    assert!(margins.windows(2).all(|w| w[0] >= w[1]));
    assert!(!report.deadline_hit);
}

#[tokio::test]
async fn failing_event_does_not_abort_the_scan() {
    let harness = Harness::new(
        ScriptedProvider::new()
            .with_failure(event("broken"), "HTTP 503")
            .with_snapshot(two_way_arbitrage("evt-1")),
    );

    let report = harness.scanner(settings()).scan(&ScanRequest::default()).await;

    assert_eq!(report.events_failed, 1);
    assert_eq!(report.events_scanned, 1);
    assert_eq!(report.opportunities.len(), 2);
}

#[tokio::test]
async fn slow_event_times_out_and_is_counted() {
    let harness = Harness::new(
        ScriptedProvider::new()
            .with_delayed_snapshot(priced("slow", dec!(2.30), dec!(2.30)), Duration::from_secs(3))
            .with_snapshot(two_way_arbitrage("evt-1")),
    );
    let mut settings = settings();
    settings.event_timeout = Duration::from_millis(50);

    let report = harness.scanner(settings).scan(&ScanRequest::default()).await;

    assert_eq!(report.events_timed_out, 1);
    assert_eq!(report.events_failed, 0);
    assert!(report
        .opportunities
        .iter()
        .all(|o| o.event_id().as_str() == "evt-1"));
}

#[tokio::test]
async fn deadline_finalizes_with_partial_results() {
    let delay = Duration::from_millis(150);
    let harness = Harness::new(
        ScriptedProvider::new()
            .with_delayed_snapshot(two_way_arbitrage("evt-1"), delay)
            .with_delayed_snapshot(two_way_arbitrage("evt-2"), delay)
            .with_delayed_snapshot(two_way_arbitrage("evt-3"), delay)
            .with_delayed_snapshot(two_way_arbitrage("evt-4"), delay),
    );
    let mut settings = settings();
    settings.workers = 1;
    settings.event_timeout = Duration::from_secs(1);
    settings.deadline = Duration::from_millis(250);

    let report = harness.scanner(settings).scan(&ScanRequest::default()).await;

    assert!(report.deadline_hit);
    assert!(report.events_scanned >= 1);
    assert!(report.events_scanned < 4);
}

#[tokio::test]
async fn workers_bound_concurrent_fetches() {
    let mut provider = ScriptedProvider::new();
    for i in 0..8 {
        provider = provider.with_delayed_snapshot(
            two_way_arbitrage(&format!("evt-{i}")),
            Duration::from_millis(20),
        );
    }
    let harness = Harness::new(provider);
    let mut settings = settings();
    settings.workers = 2;

    let report = harness.scanner(settings).scan(&ScanRequest::default()).await;

    assert_eq!(report.events_scanned, 8);
    assert!(harness.provider.max_in_flight() <= 2);
}

#[tokio::test]
async fn started_events_are_skipped() {
    let harness = Harness::new(ScriptedProvider::new().with_snapshot(two_way_arbitrage("evt-1")));
    harness.clock.set(kickoff());

    let report = harness.scanner(settings()).scan(&ScanRequest::default()).await;

    assert_eq!(report.events_scanned, 0);
    assert!(report.opportunities.is_empty());
    assert_eq!(harness.provider.fetch_count(), 0);
}

#[tokio::test]
async fn past_events_do_not_crowd_out_upcoming_ones() {
    let mut provider = ScriptedProvider::new().with_snapshot(two_way_arbitrage("live"));
    for i in 0..30 {
        let starts_at = before_kickoff() - ChronoDuration::hours(1) - ChronoDuration::minutes(i);
        provider = provider.with_event(EventInfo::new(format!("past-{i}"), "Past vs Past", starts_at));
    }
    let harness = Harness::new(provider);

    let report = harness.scanner(settings()).scan(&ScanRequest::default()).await;

    assert_eq!(report.events_scanned, 1);
    assert_eq!(report.opportunities.len(), 2);
    assert!(report
        .opportunities
        .iter()
        .all(|o| o.event_id().as_str() == "live"));
}

#[tokio::test]
async fn listing_failure_yields_empty_report() {
    let harness = Harness::new(ScriptedProvider::new().with_listing_failure("connection refused"));

    let report = harness.scanner(settings()).scan(&ScanRequest::default()).await;

    assert!(report.is_empty());
    assert_eq!(report.events_scanned, 0);
}

#[tokio::test]
async fn events_without_the_market_yield_nothing() {
    let harness = Harness::new(ScriptedProvider::new().with_event(event("evt-1")));

    let report = harness.scanner(settings()).scan(&ScanRequest::default()).await;
    assert_eq!(report.events_scanned, 1);
    assert!(report.opportunities.is_empty());

    let request = ScanRequest {
        market_type: MarketType::OverUnder,
        ..ScanRequest::default()
    };
    let harness = Harness::new(ScriptedProvider::new().with_snapshot(two_way_arbitrage("evt-1")));
    let report = harness.scanner(settings()).scan(&request).await;
    assert!(report.opportunities.is_empty());
}

#[tokio::test]
async fn default_event_cap_follows_limit() {
    let mut provider = ScriptedProvider::new();
    for i in 0..10 {
        provider = provider.with_snapshot(two_way_arbitrage(&format!("evt-{i}")));
    }
    let harness = Harness::new(provider);

    let request = ScanRequest {
        limit: 2,
        ..ScanRequest::default()
    };
    let report = harness.scanner(settings()).scan(&request).await;

    assert_eq!(report.events_scanned, 4);
    assert_eq!(report.opportunities.len(), 2);
}

#[tokio::test]
async fn margin_threshold_comes_from_the_request() {
    let harness = Harness::new(ScriptedProvider::new().with_snapshot(two_way_arbitrage("evt-1")));
    let mut request = ScanRequest::default();
    request.policy = request.policy.with_min_profit_margin(dec!(0.02));

    let report = harness.scanner(settings()).scan(&request).await;

    assert_eq!(report.opportunities.len(), 1);
    assert!(report.opportunities[0].profit_margin() >= dec!(0.02));
}

#[tokio::test]
async fn rescans_supersede_vanished_opportunities() {
    let first = Harness::new(ScriptedProvider::new().with_snapshot(two_way_arbitrage("evt-1")));
    let report = first.scanner(settings()).scan(&ScanRequest::default()).await;
    let ids: Vec<_> = report.opportunities.iter().map(|o| o.id()).collect();
    assert_eq!(first.tracker.len(), 2);

    // Same event, prices moved back to fair value.
    let second = Harness {
        provider: Arc::new(ScriptedProvider::new().with_snapshot(fair_market("evt-1"))),
        clock: Arc::clone(&first.clock),
        tracker: Arc::clone(&first.tracker),
    };
    second.scanner(settings()).scan(&ScanRequest::default()).await;

    for id in ids {
        assert!(first.tracker.get(&id).is_none());
    }
    assert!(first.tracker.active(first.clock.now()).is_empty());
}

#[tokio::test]
async fn rescans_keep_stable_ids() {
    let harness = Harness::new(ScriptedProvider::new().with_snapshot(two_way_arbitrage("evt-1")));
    let scanner = harness.scanner(settings());

    let first = scanner.scan(&ScanRequest::default()).await;
    harness.clock.advance(ChronoDuration::minutes(1));
    let second = scanner.scan(&ScanRequest::default()).await;

    let first_ids: Vec<_> = first.opportunities.iter().map(|o| o.id()).collect();
    let second_ids: Vec<_> = second.opportunities.iter().map(|o| o.id()).collect();
    assert_eq!(first_ids, second_ids);
    assert!(second
        .opportunities
        .iter()
        .all(|o| o.status() == OpportunityStatus::Detected));
}

#[tokio::test]
async fn scan_results_are_written_to_the_cache() {
    let harness = Harness::new(ScriptedProvider::new().with_snapshot(two_way_arbitrage("evt-1")));
    let cache = Arc::new(MemoryOpportunityCache::default());
    let scanner = harness.scanner(settings()).with_cache(cache.clone());

    let report = scanner.scan(&ScanRequest::default()).await;

    let key = cache_key(&EventId::new("evt-1"), &MarketId::new("h2h"));
    let mut cached = None;
    for _ in 0..50 {
        cached = cache.get(&key).await.unwrap();
        if cached.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(cached.unwrap(), report.opportunities);
}
