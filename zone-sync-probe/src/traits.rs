//! Resolution abstraction used by the zone sync check

use async_trait::async_trait;

use crate::error::ProbeResult;
use crate::types::SoaAnswer;

/// Resolver Trait
///
/// Answers the two questions the check asks of DNS. Inject an implementation
/// into [`ZoneSyncCheck`](crate::ZoneSyncCheck); tests pass a double.
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    /// List the nameservers advertised in the zone's NS records
    ///
    /// Hostnames come back without the trailing dot, in answer order. A zone
    /// with no NS records (or that does not exist) yields an empty list; only
    /// unexpected failures are errors.
    ///
    /// # Arguments
    /// * `domain` - Zone name
    async fn list_nameservers(&self, domain: &str) -> ProbeResult<Vec<String>>;

    /// Ask one nameserver for the zone's SOA record, on each of its addresses
    ///
    /// Returns one answer per address queried, in query order. An address
    /// that fails, times out, refuses or answers empty yields
    /// [`SoaAnswer::Missing`], and a nameserver that cannot be reached at all
    /// yields no answers. Errors are reserved for unexpected conditions.
    ///
    /// # Arguments
    /// * `domain` - Zone name
    /// * `nameserver` - Hostname or IP address of the server to query
    async fn query_soa(&self, domain: &str, nameserver: &str) -> ProbeResult<Vec<SoaAnswer>>;
}

