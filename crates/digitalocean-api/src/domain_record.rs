//! Individual DNS records within a domain.

use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// DNS record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Certificate authority authorization.
    Caa,
    /// Canonical name.
    Cname,
    /// Mail exchanger.
    Mx,
    /// Name server.
    Ns,
    /// Free-form text.
    Txt,
    /// Service locator.
    Srv,
}

/// Parameter tag on CAA records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaaTag {
    /// Authorize a CA to issue certificates.
    Issue,
    /// Authorize a CA to issue wildcard certificates.
    IssueWild,
    /// Where CAs report policy violations.
    Iodef,
}

/// A DNS record as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Record id.
    pub id: u64,
    /// Record type.
    #[serde(rename = "type")]
    pub kind: RecordType,
    /// Host name pattern (e.g. `*.example.com`).
    pub name: String,
    /// Record value.
    pub data: String,
    /// Priority, for MX and SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Port, for SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// TTL in seconds.
    pub ttl: u32,
    /// Weight, for SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Flags, for CAA records.
    pub flags: u32,
    /// Parameter tag, for CAA records.
    pub tag: CaaTag,
}

impl DomainRecord {
    /// The record's mutable fields, for create and update bodies.
    #[must_use]
    pub fn params(&self) -> DomainRecordParams {
        DomainRecordParams {
            kind: self.kind,
            name: self.name.clone(),
            data: self.data.clone(),
            priority: self.priority,
            port: self.port,
            ttl: self.ttl,
            weight: self.weight,
            flags: self.flags,
            tag: self.tag,
        }
    }
}

/// The writable subset of a record: everything but the server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecordParams {
    /// Record type.
    #[serde(rename = "type")]
    pub kind: RecordType,
    /// Host name pattern.
    pub name: String,
    /// Record value.
    pub data: String,
    /// Priority, for MX and SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Port, for SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// TTL in seconds.
    pub ttl: u32,
    /// Weight, for SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Flags, for CAA records.
    pub flags: u32,
    /// Parameter tag, for CAA records.
    pub tag: CaaTag,
}

/// Response wrapper for a single record.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainRecordResponse {
    /// The record.
    pub domain_record: DomainRecord,
}

impl ApiResponse for DomainRecordResponse {}

/// Response wrapper for a domain's record collection.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainRecordsResponse {
    /// Records in the domain.
    pub domain_records: Vec<DomainRecord>,
}

impl ApiResponse for DomainRecordsResponse {}

/// List all records in a domain.
#[derive(Debug, Clone)]
pub struct ListDomainRecords {
    /// Domain name.
    pub domain: String,
}

impl Request for ListDomainRecords {
    type Body = NoContent;
    type Response = DomainRecordsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("domains/{}/records", self.domain)
    }
}

/// Create a record in a domain.
#[derive(Debug, Clone)]
pub struct CreateDomainRecord {
    /// Domain name.
    pub domain: String,
    /// Record to create.
    pub record: DomainRecordParams,
}

impl Request for CreateDomainRecord {
    type Body = DomainRecordParams;
    type Response = DomainRecordResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("domains/{}/records", self.domain)
    }

    fn body(&self) -> Option<&DomainRecordParams> {
        Some(&self.record)
    }
}

/// Fetch a single record.
#[derive(Debug, Clone)]
pub struct GetDomainRecord {
    /// Domain name.
    pub domain: String,
    /// Record id.
    pub record_id: u64,
}

impl Request for GetDomainRecord {
    type Body = NoContent;
    type Response = DomainRecordResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("domains/{}/records/{}", self.domain, self.record_id)
    }
}

/// Replace a record wholesale; partial updates are not supported.
#[derive(Debug, Clone)]
pub struct UpdateDomainRecord {
    /// Domain name.
    pub domain: String,
    /// Id of the record being replaced.
    pub record_id: u64,
    /// Replacement contents.
    pub record: DomainRecordParams,
}

impl UpdateDomainRecord {
    /// Replace `record` with its current in-memory contents.
    #[must_use]
    pub fn new(domain: impl Into<String>, record: &DomainRecord) -> Self {
        Self {
            domain: domain.into(),
            record_id: record.id,
            record: record.params(),
        }
    }
}

impl Request for UpdateDomainRecord {
    type Body = DomainRecordParams;
    type Response = DomainRecordResponse;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("domains/{}/records/{}", self.domain, self.record_id)
    }

    fn body(&self) -> Option<&DomainRecordParams> {
        Some(&self.record)
    }
}

/// Delete a record.
#[derive(Debug, Clone)]
pub struct DeleteDomainRecord {
    /// Domain name.
    pub domain: String,
    /// Record id.
    pub record_id: u64,
}

impl Request for DeleteDomainRecord {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("domains/{}/records/{}", self.domain, self.record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caa_record() -> DomainRecord {
        DomainRecord {
            id: 3352896,
            kind: RecordType::Caa,
            name: "@".to_string(),
            data: "letsencrypt.org".to_string(),
            priority: None,
            port: None,
            ttl: 1800,
            weight: None,
            flags: 0,
            tag: CaaTag::Issue,
        }
    }

    #[test]
    fn record_types_use_their_wire_names() {
        assert_eq!(serde_json::to_string(&RecordType::Aaaa).unwrap(), "\"AAAA\"");
        assert_eq!(serde_json::to_string(&RecordType::Cname).unwrap(), "\"CNAME\"");
        assert_eq!(serde_json::to_string(&CaaTag::IssueWild).unwrap(), "\"issuewild\"");
    }

    #[test]
    fn params_drop_the_server_assigned_id() {
        let record = caa_record();
        let body = serde_json::to_value(record.params()).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["type"], "CAA");
        assert_eq!(body["tag"], "issue");
    }

    #[test]
    fn update_is_wired_from_the_existing_record() {
        let record = caa_record();
        let request = UpdateDomainRecord::new("example.com", &record);
        assert_eq!(request.path(), "domains/example.com/records/3352896");
        assert_eq!(request.body().unwrap().ttl, 1800);
    }
}
