//! Zone sync check integration tests
//!
//! The network test is ignored by default:
//! ```bash
//! cargo test -p zone-sync-probe --test zone_sync_test -- --ignored --nocapture
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use zone_sync_probe::{
    evaluate, CheckOutcome, CheckRequest, HickoryZoneResolver, NameserverAnswer, ProbeResult,
    SoaAnswer, Status, Thresholds, ZoneResolver, ZoneSyncCheck,
};

/// Static zone data keyed by nameserver; unknown nameservers cannot be reached.
struct StaticZone {
    nameservers: Vec<String>,
    records: HashMap<String, String>,
}

impl StaticZone {
    fn new(nameservers: &[&str], records: &[(&str, &str)]) -> Self {
        Self {
            nameservers: nameservers.iter().map(|ns| (*ns).to_string()).collect(),
            records: records
                .iter()
                .map(|(ns, soa)| ((*ns).to_string(), (*soa).to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl ZoneResolver for StaticZone {
    async fn list_nameservers(&self, _domain: &str) -> ProbeResult<Vec<String>> {
        Ok(self.nameservers.clone())
    }

    async fn query_soa(&self, _domain: &str, nameserver: &str) -> ProbeResult<Vec<SoaAnswer>> {
        Ok(self
            .records
            .get(nameserver)
            .map(|soa| SoaAnswer::from_text(soa))
            .into_iter()
            .collect())
    }
}

async fn check(zone: StaticZone, request: CheckRequest) -> CheckOutcome {
    ZoneSyncCheck::new(Arc::new(zone)).run(&request).await
}

#[tokio::test]
async fn test_two_agreeing_nameservers_are_ok() {
    let zone = StaticZone::new(&["a.example", "b.example"], &[("a.example", "X"), ("b.example", "X")]);
    let outcome = check(zone, CheckRequest::new("example.org")).await;
    assert_eq!(outcome, CheckOutcome::new(Status::Ok, "X"));
    assert_eq!(outcome.to_string(), "OK: X");
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_single_nameserver_below_critical_threshold() {
    let zone = StaticZone::new(&["a.example"], &[("a.example", "X")]);
    let request = CheckRequest::new("example.org").with_thresholds(Thresholds::new(2, 2));
    let outcome = check(zone, request).await;
    assert_eq!(outcome.status, Status::Critical);
    assert_eq!(
        outcome.message,
        "Less than 2 nameservers for domain \"example.org\", only 1 available. ['a.example']"
    );
}

#[tokio::test]
async fn test_silent_hidden_primary_is_the_only_offender() {
    let zone = StaticZone::new(&["a.example", "b.example"], &[("a.example", "X"), ("b.example", "X")]);
    let request = CheckRequest::new("example.org").with_hidden_primaries(vec!["h.example".to_string()]);
    let outcome = check(zone, request).await;
    assert_eq!(
        outcome.to_string(),
        "CRITICAL: Nameserver(s) ['h.example'] did not return SOA record for domain \"example.org\""
    );
    assert_eq!(outcome.exit_code(), 2);
}

#[tokio::test]
async fn test_no_nameservers_regardless_of_thresholds() {
    for thresholds in [Thresholds::default(), Thresholds::new(1, 1), Thresholds::new(9, 9)] {
        let zone = StaticZone::new(&[], &[]);
        let request = CheckRequest::new("example.org")
            .with_hidden_primaries(vec!["h.example".to_string()])
            .with_thresholds(thresholds);
        let outcome = check(zone, request).await;
        assert_eq!(
            outcome,
            CheckOutcome::new(
                Status::Critical,
                "No nameserver for domain \"example.org\", dns is unavailable."
            )
        );
    }
}

#[tokio::test]
async fn test_critical_minimum_met_exactly_is_not_critical() {
    let zone = StaticZone::new(
        &["a.example", "b.example", "c.example"],
        &[("a.example", "X"), ("b.example", "X"), ("c.example", "X")],
    );
    let request = CheckRequest::new("example.org").with_thresholds(Thresholds::new(4, 3));
    let outcome = check(zone, request).await;
    assert_eq!(outcome.status, Status::Warning);
}

#[tokio::test]
async fn test_invalid_domain_is_unknown() {
    let zone = StaticZone::new(&["a.example"], &[("a.example", "X")]);
    let outcome = check(zone, CheckRequest::new("not a valid domain!!!")).await;
    assert_eq!(outcome.status, Status::Unknown);
    assert_eq!(outcome.exit_code(), 3);
}

#[tokio::test]
async fn test_underscore_zone_is_checked() {
    let zone = StaticZone::new(&["a.example", "b.example"], &[("a.example", "X"), ("b.example", "X")]);
    let outcome = check(zone, CheckRequest::new("_acme-challenge.example.org")).await;
    assert_eq!(outcome, CheckOutcome::new(Status::Ok, "X"));
}

#[tokio::test]
async fn test_messages_keep_the_domain_as_given() {
    let zone = StaticZone::new(&["a.example"], &[("a.example", "X")]);
    let request = CheckRequest::new("Example.ORG.").with_thresholds(Thresholds::new(2, 1));
    let outcome = check(zone, request).await;
    assert_eq!(
        outcome.message,
        "Expected at least 2 nameservers for domain \"Example.ORG.\", but only found 1 - ['a.example']"
    );
}

#[test]
fn test_evaluate_is_usable_without_a_resolver() {
    let advertised = vec!["a.example".to_string(), "b.example".to_string()];
    let answers = vec![
        NameserverAnswer::new("a.example", SoaAnswer::record_of("1")),
        NameserverAnswer::new("b.example", SoaAnswer::record_of("2")),
    ];
    let outcome = evaluate("example.org", &advertised, &[], &answers, Thresholds::default()).unwrap();
    assert_eq!(
        outcome.to_string(),
        "CRITICAL: Nameservers do not agree for domain \"example.org\" ['1', '2']"
    );
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_real_zone_is_in_sync() {
    let check = ZoneSyncCheck::new(Arc::new(HickoryZoneResolver::new()));
    let outcome = check.run(&CheckRequest::new("example.com")).await;
    println!("{outcome}");
    assert_ne!(outcome.status, Status::Unknown);
}
