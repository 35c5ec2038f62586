//! Zone consistency evaluation.
//!
//! Turns per-nameserver SOA answers and the nameserver-count thresholds into a
//! single [`CheckOutcome`]. Performs no I/O.

use crate::error::{ProbeError, ProbeResult};
use crate::types::{CheckOutcome, NameserverAnswer, Status, Thresholds};

/// Evaluate the health of `domain`.
///
/// `answers` must line up position by position with `advertised` followed by
/// `hidden_primaries`. It is not inspected when `advertised` is empty, so an
/// empty slice is fine in that case.
///
/// Rules, first match wins:
/// 1. no advertised nameserver: critical
/// 2. any nameserver (advertised or hidden) without an answer on every one
///    of its addresses: critical
/// 3. any record differing from the first one: critical. A nameserver
///    reached at several addresses contributes one record per address.
/// 4. fewer advertised nameservers than the critical threshold: critical
/// 5. fewer advertised nameservers than the warning threshold: warning
/// 6. otherwise ok, with the agreed SOA record as message
///
/// Only a malformed `answers` slice is an error.
pub fn evaluate(
    domain: &str,
    advertised: &[String],
    hidden_primaries: &[String],
    answers: &[NameserverAnswer],
    thresholds: Thresholds,
) -> ProbeResult<CheckOutcome> {
    if advertised.is_empty() {
        return Ok(CheckOutcome::new(
            Status::Critical,
            format!("No nameserver for domain \"{domain}\", dns is unavailable."),
        ));
    }

    check_alignment(advertised, hidden_primaries, answers)?;

    let silent: Vec<&str> = answers
        .iter()
        .filter(|entry| entry.is_missing())
        .map(|entry| entry.nameserver.as_str())
        .collect();
    if !silent.is_empty() {
        return Ok(CheckOutcome::new(
            Status::Critical,
            format!(
                "Nameserver(s) {} did not return SOA record for domain \"{domain}\"",
                quoted_list(silent)
            ),
        ));
    }

    // Every nameserver answered on every address at this point.
    let records: Vec<&str> = answers
        .iter()
        .flat_map(|entry| entry.records())
        .collect();
    let reference = records[0];
    if records.iter().any(|record| *record != reference) {
        return Ok(CheckOutcome::new(
            Status::Critical,
            format!(
                "Nameservers do not agree for domain \"{domain}\" {}",
                quoted_list(records)
            ),
        ));
    }

    let available = advertised.len();
    if available < thresholds.critical_minimum_nameservers {
        return Ok(CheckOutcome::new(
            Status::Critical,
            format!(
                "Less than {} nameservers for domain \"{domain}\", only {available} available. {}",
                thresholds.critical_minimum_nameservers,
                quoted_list(advertised.iter().map(String::as_str))
            ),
        ));
    }
    if available < thresholds.warning_minimum_nameservers {
        return Ok(CheckOutcome::new(
            Status::Warning,
            format!(
                "Expected at least {} nameservers for domain \"{domain}\", but only found {available} - {}",
                thresholds.warning_minimum_nameservers,
                quoted_list(advertised.iter().map(String::as_str))
            ),
        ));
    }

    Ok(CheckOutcome::new(Status::Ok, reference))
}

/// The nameservers queried for a zone: advertised first, then hidden
/// primaries. Order is kept and duplicates are not removed.
pub fn queried_nameservers<'a>(
    advertised: &'a [String],
    hidden_primaries: &'a [String],
) -> impl Iterator<Item = &'a String> {
    advertised.iter().chain(hidden_primaries)
}

fn check_alignment(
    advertised: &[String],
    hidden_primaries: &[String],
    answers: &[NameserverAnswer],
) -> ProbeResult<()> {
    let expected = advertised.len() + hidden_primaries.len();
    if answers.len() != expected {
        return Err(ProbeError::InvalidAnswerSet(format!(
            "expected {expected} SOA answers, got {}",
            answers.len()
        )));
    }
    for (position, (nameserver, entry)) in queried_nameservers(advertised, hidden_primaries)
        .zip(answers)
        .enumerate()
    {
        if *nameserver != entry.nameserver {
            return Err(ProbeError::InvalidAnswerSet(format!(
                "answer #{position} belongs to {} but {nameserver} was expected",
                entry.nameserver
            )));
        }
    }
    Ok(())
}

/// Render strings as `['a', 'b']`.
fn quoted_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.into_iter().map(quote).collect();
    format!("[{}]", quoted.join(", "))
}

/// Single-quote a string; fall back to double quotes when that avoids escaping.
fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}
