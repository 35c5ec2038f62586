//! Zone sync check orchestration.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{ProbeError, ProbeResult};
use crate::evaluator::{evaluate, queried_nameservers};
use crate::traits::ZoneResolver;
use crate::types::{CheckOutcome, CheckRequest, NameserverAnswer, Status};

use super::validate_domain;

/// Runs a zone sync check against an injected [`ZoneResolver`].
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use zone_sync_probe::{CheckRequest, HickoryZoneResolver, ZoneSyncCheck};
/// # async fn demo() {
/// let check = ZoneSyncCheck::new(Arc::new(HickoryZoneResolver::new()));
/// let outcome = check.run(&CheckRequest::new("example.com")).await;
/// println!("{outcome}");
/// # }
/// ```
pub struct ZoneSyncCheck {
    resolver: Arc<dyn ZoneResolver>,
}

impl ZoneSyncCheck {
    #[must_use]
    pub fn new(resolver: Arc<dyn ZoneResolver>) -> Self {
        Self { resolver }
    }

    /// Check the zone and always produce an outcome.
    ///
    /// Errors that stop the check from reaching a verdict are reported as
    /// [`Status::Unknown`] with the error text as message.
    pub async fn run(&self, request: &CheckRequest) -> CheckOutcome {
        match self.try_run(request).await {
            Ok(outcome) => {
                log::debug!("Zone sync check for {}: {outcome}", request.domain);
                outcome
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Zone sync check for {} aborted: {e}", request.domain);
                } else {
                    log::error!("Zone sync check for {} failed: {e}", request.domain);
                }
                CheckOutcome::new(Status::Unknown, e.to_string())
            }
        }
    }

    /// Check the zone, surfacing errors instead of mapping them to a status.
    ///
    /// Lookups use the normalised zone name; messages quote the domain as
    /// the caller spelled it.
    pub async fn try_run(&self, request: &CheckRequest) -> ProbeResult<CheckOutcome> {
        let domain = validate_domain(&request.domain)?;

        let advertised = self.resolver.list_nameservers(&domain).await?;
        log::debug!("Advertised nameservers for {domain}: {advertised:?}");

        // Without advertised nameservers nothing is queried.
        let answers = if advertised.is_empty() {
            Vec::new()
        } else {
            self.collect_answers(&domain, &advertised, &request.hidden_primaries)
                .await?
        };

        evaluate(
            request.domain.trim(),
            &advertised,
            &request.hidden_primaries,
            &answers,
            request.thresholds,
        )
    }

    /// Query every nameserver in turn; the result is complete or an error.
    async fn collect_answers(
        &self,
        domain: &str,
        advertised: &[String],
        hidden_primaries: &[String],
    ) -> ProbeResult<Vec<NameserverAnswer>> {
        stream::iter(queried_nameservers(advertised, hidden_primaries))
            .then(|nameserver| async move {
                let answers = self.resolver.query_soa(domain, nameserver).await?;
                log::debug!("SOA for {domain} @{nameserver}: {answers:?}");
                Ok::<_, ProbeError>(NameserverAnswer::per_address(nameserver.as_str(), answers))
            })
            .try_collect()
            .await
    }
}
