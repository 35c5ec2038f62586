//! Check orchestration and the hickory-backed resolver.

mod check;
mod hickory;
mod resolver;

pub use check::ZoneSyncCheck;
pub use hickory::HickoryZoneResolver;
pub use resolver::DEFAULT_QUERY_TIMEOUT_SECS;

use idna::AsciiDenyList;

use crate::error::{ProbeError, ProbeResult};

/// STD3 rules minus the underscore, which service zones such as
/// `_acme-challenge.example.com` carry.
const ZONE_NAME_DENY_LIST: AsciiDenyList =
    AsciiDenyList::new(true, "!\"#$%&'()*+,/:;<=>?@[\\]^`{|}~");

/// Validate and normalise a zone name.
///
/// Trims whitespace and a single trailing dot, converts internationalised
/// domain names (IDN) to ASCII via IDNA 2008, and rejects empty input, IP
/// addresses, punctuation other than `-` and `_`, and overlong names.
pub(crate) fn validate_domain(domain: &str) -> ProbeResult<String> {
    let domain = domain.trim();
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.is_empty() {
        return Err(ProbeError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if domain.parse::<std::net::IpAddr>().is_ok() {
        return Err(ProbeError::ValidationError(format!(
            "Expected a zone name, got IP address {domain}"
        )));
    }
    // IDNA processing: converts Unicode labels to Punycode and validates.
    let ascii_domain = idna::domain_to_ascii_cow(domain.as_bytes(), ZONE_NAME_DENY_LIST)
        .map_err(|_| ProbeError::ValidationError(format!("Invalid domain name: {domain}")))?
        .into_owned();
    if ascii_domain.len() > 253 {
        return Err(ProbeError::ValidationError(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}
