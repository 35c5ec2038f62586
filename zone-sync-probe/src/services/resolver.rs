//! Shared DNS resolver helpers used by [`HickoryZoneResolver`](super::HickoryZoneResolver).

use std::net::SocketAddr;
use std::time::Duration;

use hickory_resolver::{
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::rr::rdata::SOA,
    TokioResolver,
};

/// Default per-query timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

/// Port SOA queries are sent to.
pub(crate) const DNS_PORT: u16 = 53;

/// Build a resolver that sends queries straight to `target` and nowhere else.
///
/// Caching is disabled so every check sees what the server serves right now,
/// and each query is attempted once.
pub(crate) fn build_direct_resolver(target: SocketAddr, timeout: Duration) -> TokioResolver {
    let config = ResolverConfig::from_parts(
        None,
        vec![],
        NameServerConfigGroup::from_ips_clear(&[target.ip()], target.port(), true),
    );
    let provider = TokioConnectionProvider::default();
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.cache_size = 0;
    TokioResolver::builder_with_config(config, provider)
        .with_options(opts)
        .build()
}

/// Build a resolver using the host system DNS configuration (with fallback).
pub(crate) fn build_system_resolver(timeout: Duration) -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(mut builder) => {
                builder.options_mut().timeout = timeout;
                return builder.build();
            }
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    let provider = TokioConnectionProvider::default();
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    TokioResolver::builder_with_config(ResolverConfig::default(), provider)
        .with_options(opts)
        .build()
}

/// Render an SOA record the way `dig +short SOA` prints it.
pub(crate) fn format_soa(soa: &SOA) -> String {
    format!(
        "{} {} {} {} {} {} {}",
        soa.mname(),
        soa.rname(),
        soa.serial(),
        soa.refresh(),
        soa.retry(),
        soa.expire(),
        soa.minimum()
    )
}

/// Make `name` absolute so the system search list is never appended.
pub(crate) fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}
