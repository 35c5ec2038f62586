//! Zone sync probe
//!
//! Verifies that every nameserver advertised for a DNS zone, plus any hidden
//! primaries, serves the same SOA record, and that enough nameservers are
//! advertised. The verdict is a monitoring-plugin style [`CheckOutcome`]
//! (OK / WARNING / CRITICAL / UNKNOWN plus a message).
//!
//! - [`evaluate`] is the pure decision procedure over already-fetched answers.
//! - [`ZoneResolver`] is the DNS seam; [`HickoryZoneResolver`] talks to real DNS.
//! - [`ZoneSyncCheck`] fetches the answers through a resolver and evaluates them.

mod error;
mod evaluator;
mod services;
mod traits;
mod types;

#[cfg(test)]
mod test_utils;

pub use error::{ProbeError, ProbeResult};
pub use evaluator::{evaluate, queried_nameservers};
pub use services::{HickoryZoneResolver, ZoneSyncCheck, DEFAULT_QUERY_TIMEOUT_SECS};
pub use traits::ZoneResolver;
pub use types::{CheckOutcome, CheckRequest, NameserverAnswer, SoaAnswer, Status, Thresholds};
