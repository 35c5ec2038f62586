//! [`ZoneResolver`] backed by hickory-resolver.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use log::debug;
use tokio::time::{timeout, timeout_at, Instant};

use crate::error::{ProbeError, ProbeResult};
use crate::traits::ZoneResolver;
use crate::types::SoaAnswer;

use super::resolver::{
    absolute, build_direct_resolver, build_system_resolver, format_soa,
    DEFAULT_QUERY_TIMEOUT_SECS, DNS_PORT,
};

/// Talks to real DNS.
///
/// NS records are looked up through the host's configured resolver. SOA
/// records are requested from each nameserver directly, one address at a
/// time on every address its hostname resolves to, with caching off.
///
/// The query timeout bounds the NS lookup. For SOA it bounds the whole
/// exchange with one nameserver: resolving its hostname and querying each
/// of its addresses share a single deadline.
pub struct HickoryZoneResolver {
    system: TokioResolver,
    query_timeout: Duration,
}

impl HickoryZoneResolver {
    /// Create a resolver with the default 5 second query timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn with_timeout(query_timeout: Duration) -> Self {
        Self {
            system: build_system_resolver(query_timeout),
            query_timeout,
        }
    }

    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Addresses to send SOA queries to, sorted. IP literals are used as-is.
    async fn nameserver_addresses(&self, nameserver: &str, deadline: Instant) -> Vec<IpAddr> {
        if let Ok(ip) = nameserver.parse::<IpAddr>() {
            return vec![ip];
        }
        match timeout_at(deadline, self.system.lookup_ip(absolute(nameserver))).await {
            Ok(Ok(lookup)) => {
                // Resolvers rotate address order; query order must not move.
                let mut addresses: Vec<IpAddr> = lookup.iter().collect();
                addresses.sort_unstable();
                addresses.dedup();
                addresses
            }
            Ok(Err(e)) => {
                debug!("Could not resolve nameserver {nameserver}: {e}");
                Vec::new()
            }
            Err(_) => {
                debug!(
                    "Resolving nameserver {nameserver} timed out ({}s)",
                    self.query_timeout.as_secs_f32()
                );
                Vec::new()
            }
        }
    }

    /// Query each target in turn.
    ///
    /// Stops after the first target without an answer: the nameserver counts
    /// as missing either way.
    async fn query_targets(
        &self,
        domain: &str,
        nameserver: &str,
        targets: &[SocketAddr],
        deadline: Instant,
    ) -> Vec<SoaAnswer> {
        let mut answers = Vec::with_capacity(targets.len());
        for &target in targets {
            let answer = self.query_target(domain, nameserver, target, deadline).await;
            let missing = answer.is_missing();
            answers.push(answer);
            if missing {
                break;
            }
        }
        answers
    }

    async fn query_target(
        &self,
        domain: &str,
        nameserver: &str,
        target: SocketAddr,
        deadline: Instant,
    ) -> SoaAnswer {
        let resolver = build_direct_resolver(target, self.query_timeout);
        match timeout_at(deadline, resolver.soa_lookup(absolute(domain))).await {
            Ok(Ok(response)) => response
                .iter()
                .next()
                .map_or(SoaAnswer::Missing, |soa| SoaAnswer::from_text(&format_soa(soa))),
            Ok(Err(e)) => {
                debug!("SOA query for {domain} @{nameserver} ({target}) failed: {e}");
                SoaAnswer::Missing
            }
            Err(_) => {
                debug!(
                    "SOA query for {domain} @{nameserver} ({target}) timed out ({}s)",
                    self.query_timeout.as_secs_f32()
                );
                SoaAnswer::Missing
            }
        }
    }
}

impl Default for HickoryZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ZoneResolver for HickoryZoneResolver {
    async fn list_nameservers(&self, domain: &str) -> ProbeResult<Vec<String>> {
        match timeout(self.query_timeout, self.system.ns_lookup(absolute(domain))).await {
            Ok(Ok(response)) => Ok(response
                .iter()
                .map(|ns| ns.to_string().trim_end_matches('.').to_string())
                .collect()),
            Ok(Err(e)) if e.is_no_records_found() || e.is_nx_domain() => {
                debug!("No NS records for {domain}: {e}");
                Ok(Vec::new())
            }
            Ok(Err(e)) => Err(ProbeError::NetworkError(format!(
                "NS lookup for {domain} failed: {e}"
            ))),
            Err(_) => Err(ProbeError::NetworkError(format!(
                "NS lookup for {domain} timed out ({}s)",
                self.query_timeout.as_secs_f32()
            ))),
        }
    }

    async fn query_soa(&self, domain: &str, nameserver: &str) -> ProbeResult<Vec<SoaAnswer>> {
        let deadline = Instant::now() + self.query_timeout;
        let targets: Vec<SocketAddr> = self
            .nameserver_addresses(nameserver, deadline)
            .await
            .into_iter()
            .map(|ip| SocketAddr::new(ip, DNS_PORT))
            .collect();
        Ok(self.query_targets(domain, nameserver, &targets, deadline).await)
    }
}
