//! Public types consumed and produced by the zone sync check.

use std::fmt;

/// Monitoring severity, following the Nagios/Icinga plugin convention.
///
/// Variants are declared from least to most severe, so the derived ordering
/// matches the numeric [`code`](Self::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Every nameserver agrees and enough of them are advertised.
    Ok,
    /// Fewer nameservers than the warning threshold.
    Warning,
    /// Zone unavailable, a nameserver did not answer, or answers disagree.
    Critical,
    /// The check itself could not be carried out.
    Unknown,
}

impl Status {
    /// Plugin exit code (0-3).
    pub const fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Short upper-case label printed in front of the message.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single `(status, message)` pair a check produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Overall severity.
    pub status: Status,
    /// Human-readable explanation. For [`Status::Ok`] this is the agreed SOA record.
    pub message: String,
}

impl CheckOutcome {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Process exit code for this outcome.
    pub const fn exit_code(&self) -> u8 {
        self.status.code()
    }
}

/// Renders the plugin output line: `"{label}: {message}"`.
impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

/// What one nameserver said when asked for the zone's SOA record.
///
/// An empty answer and a failed query are the same thing here: both are
/// [`SoaAnswer::Missing`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoaAnswer {
    /// Rendered SOA record, compared as an opaque string.
    Record(String),
    /// No answer, an empty answer, or a failed query.
    Missing,
}

impl SoaAnswer {
    /// Build an answer from raw resolver output. Blank text counts as missing.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Self::Missing
        } else {
            Self::Record(text.to_string())
        }
    }

    pub fn record_of(text: impl Into<String>) -> Self {
        Self::Record(text.into())
    }

    /// The record text, if the nameserver answered.
    pub fn record(&self) -> Option<&str> {
        match self {
            Self::Record(text) => Some(text),
            Self::Missing => None,
        }
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// SOA answers of one queried nameserver, tagged with its hostname.
///
/// A nameserver reachable at several addresses answers once per address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameserverAnswer {
    /// Hostname (or address) that was queried.
    pub nameserver: String,
    /// One answer per address, in query order.
    pub answers: Vec<SoaAnswer>,
}

impl NameserverAnswer {
    /// A nameserver that was asked at a single address.
    pub fn new(nameserver: impl Into<String>, answer: SoaAnswer) -> Self {
        Self::per_address(nameserver, vec![answer])
    }

    pub fn per_address(nameserver: impl Into<String>, answers: Vec<SoaAnswer>) -> Self {
        Self {
            nameserver: nameserver.into(),
            answers,
        }
    }

    /// True when the nameserver was not reached at all or one of its
    /// addresses did not answer.
    pub fn is_missing(&self) -> bool {
        self.answers.is_empty() || self.answers.iter().any(SoaAnswer::is_missing)
    }

    /// Records served, one per answering address.
    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().filter_map(SoaAnswer::record)
    }
}

/// Minimum advertised nameserver counts. Hidden primaries never count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Below this many advertised nameservers the check warns.
    pub warning_minimum_nameservers: usize,
    /// Below this many advertised nameservers the check is critical.
    pub critical_minimum_nameservers: usize,
}

impl Thresholds {
    pub const DEFAULT_WARNING: usize = 2;
    pub const DEFAULT_CRITICAL: usize = 1;

    pub const fn new(warning_minimum_nameservers: usize, critical_minimum_nameservers: usize) -> Self {
        Self {
            warning_minimum_nameservers,
            critical_minimum_nameservers,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WARNING, Self::DEFAULT_CRITICAL)
    }
}

/// Everything the orchestrator needs to check one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// Zone to check.
    pub domain: String,
    /// Primaries that serve the zone but are not listed in its NS records.
    pub hidden_primaries: Vec<String>,
    pub thresholds: Thresholds,
}

impl CheckRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            hidden_primaries: Vec::new(),
            thresholds: Thresholds::default(),
        }
    }

    #[must_use]
    pub fn with_hidden_primaries(mut self, hidden_primaries: Vec<String>) -> Self {
        self.hidden_primaries = hidden_primaries;
        self
    }

    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
