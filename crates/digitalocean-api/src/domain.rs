//! DNS domains.

use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// A DNS domain managed by the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name (e.g. `example.com`).
    pub name: String,
    /// Zone TTL in seconds.
    pub ttl: u32,
    /// Complete generated zone file.
    pub zone_file: String,
}

/// Response wrapper for a single domain.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainResponse {
    /// The domain.
    pub domain: Domain,
}

impl ApiResponse for DomainResponse {}

/// Response wrapper for the domain collection.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainsResponse {
    /// Managed domains.
    pub domains: Vec<Domain>,
}

impl ApiResponse for DomainsResponse {}

/// List all domains.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListDomains;

impl Request for ListDomains {
    type Body = NoContent;
    type Response = DomainsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "domains".to_string()
    }
}

/// Register a domain, optionally pointing an apex A record at an address.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDomain {
    /// Domain name.
    pub name: String,
    /// Address for the initial apex A record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl Request for CreateDomain {
    type Body = Self;
    type Response = DomainResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "domains".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single domain by name.
#[derive(Debug, Clone)]
pub struct GetDomain {
    /// Domain name.
    pub name: String,
}

impl Request for GetDomain {
    type Body = NoContent;
    type Response = DomainResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("domains/{}", self.name)
    }
}

/// Delete a domain and all of its records.
#[derive(Debug, Clone)]
pub struct DeleteDomain {
    /// Domain name.
    pub name: String,
}

impl Request for DeleteDomain {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("domains/{}", self.name)
    }
}
