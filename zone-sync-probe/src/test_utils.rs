//! Test helpers
//!
//! Scripted [`ZoneResolver`] double that records the queries it receives.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{ProbeError, ProbeResult};
use crate::traits::ZoneResolver;
use crate::types::SoaAnswer;

// ===== MockZoneResolver =====

/// Scripted outcome of a single lookup.
enum Scripted<T> {
    Answer(T),
    Failure(String),
}

pub struct MockZoneResolver {
    nameservers: HashMap<String, Scripted<Vec<String>>>,
    soas: HashMap<(String, String), Scripted<Vec<SoaAnswer>>>,
    ns_queries: Mutex<Vec<String>>,
    soa_queries: Mutex<Vec<String>>,
}

impl MockZoneResolver {
    pub fn new() -> Self {
        Self {
            nameservers: HashMap::new(),
            soas: HashMap::new(),
            ns_queries: Mutex::new(Vec::new()),
            soa_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_nameservers(mut self, domain: &str, nameservers: &[&str]) -> Self {
        let nameservers = nameservers.iter().map(|ns| (*ns).to_string()).collect();
        self.nameservers
            .insert(domain.to_string(), Scripted::Answer(nameservers));
        self
    }

    pub fn with_ns_failure(mut self, domain: &str, message: &str) -> Self {
        self.nameservers
            .insert(domain.to_string(), Scripted::Failure(message.to_string()));
        self
    }

    /// Script an SOA answer; empty text behaves like an empty `dig` answer.
    pub fn with_soa(mut self, domain: &str, nameserver: &str, record: &str) -> Self {
        self.soas.insert(
            (domain.to_string(), nameserver.to_string()),
            Scripted::Answer(vec![SoaAnswer::from_text(record)]),
        );
        self
    }

    pub fn with_missing_soa(mut self, domain: &str, nameserver: &str) -> Self {
        self.soas.insert(
            (domain.to_string(), nameserver.to_string()),
            Scripted::Answer(vec![SoaAnswer::Missing]),
        );
        self
    }

    /// Script a nameserver reachable at several addresses, one record each.
    pub fn with_soa_per_address(mut self, domain: &str, nameserver: &str, records: &[&str]) -> Self {
        let answers = records.iter().map(|record| SoaAnswer::from_text(record)).collect();
        self.soas.insert(
            (domain.to_string(), nameserver.to_string()),
            Scripted::Answer(answers),
        );
        self
    }

    pub fn with_soa_failure(mut self, domain: &str, nameserver: &str, message: &str) -> Self {
        self.soas.insert(
            (domain.to_string(), nameserver.to_string()),
            Scripted::Failure(message.to_string()),
        );
        self
    }

    /// Domains passed to `list_nameservers`, in call order.
    pub async fn ns_queries(&self) -> Vec<String> {
        self.ns_queries.lock().await.clone()
    }

    /// Nameservers passed to `query_soa`, in call order.
    pub async fn soa_queries(&self) -> Vec<String> {
        self.soa_queries.lock().await.clone()
    }
}

#[async_trait]
impl ZoneResolver for MockZoneResolver {
    async fn list_nameservers(&self, domain: &str) -> ProbeResult<Vec<String>> {
        self.ns_queries.lock().await.push(domain.to_string());
        match self.nameservers.get(domain) {
            Some(Scripted::Answer(nameservers)) => Ok(nameservers.clone()),
            Some(Scripted::Failure(message)) => Err(ProbeError::NetworkError(message.clone())),
            None => panic!("No NS answer scripted for {domain}"),
        }
    }

    async fn query_soa(&self, domain: &str, nameserver: &str) -> ProbeResult<Vec<SoaAnswer>> {
        self.soa_queries.lock().await.push(nameserver.to_string());
        match self.soas.get(&(domain.to_string(), nameserver.to_string())) {
            Some(Scripted::Answer(answers)) => Ok(answers.clone()),
            Some(Scripted::Failure(message)) => Err(ProbeError::NetworkError(message.clone())),
            None => panic!("No SOA answer scripted for {domain} @{nameserver}"),
        }
    }
}
