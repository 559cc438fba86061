//! Cloud firewalls.

use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Progress of applying a firewall to its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallStatus {
    /// Changes queued.
    Waiting,
    /// Applied everywhere.
    Succeeded,
    /// Failed to apply somewhere.
    Failed,
}

/// A droplet the firewall is still being applied to or removed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingChange {
    /// Droplet being changed.
    pub droplet_id: u64,
    /// Whether the firewall is being removed from the droplet.
    pub removing: bool,
    /// Progress on this droplet.
    pub status: FirewallStatus,
}

/// Transport protocol a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionProtocol {
    /// TCP.
    Tcp,
    /// UDP.
    Udp,
    /// ICMP; rules carry no port range.
    Icmp,
}

/// Failure parsing the string form of a [`PortRange`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed port range: {0:?}")]
pub struct InvalidPortRange(/** The rejected input. */ pub String);

/// Ports a rule matches: one port, an inclusive span, or everything.
///
/// The wire encoding is a string — `"8080"`, `"8000-9000"`, or `"all"`.
/// The API sometimes returns single ports as bare integers instead of the
/// documented string form; that is accepted on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortRange {
    /// One port.
    Single(u16),
    /// An inclusive span; `from` is strictly below `to`.
    Range {
        /// Low end of the span.
        from: u16,
        /// High end of the span.
        to: u16,
    },
    /// Every port.
    All,
}

impl FromStr for PortRange {
    type Err = InvalidPortRange;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidPortRange(raw.to_string());

        if raw == "all" {
            return Ok(Self::All);
        }
        if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) {
            let port = raw.parse().map_err(|_| malformed())?;
            return Ok(Self::Single(port));
        }
        if let Some((low, high)) = raw.split_once('-') {
            let all_digits = |half: &str| {
                !half.is_empty() && half.bytes().all(|byte| byte.is_ascii_digit())
            };
            if !all_digits(low) || !all_digits(high) {
                return Err(malformed());
            }
            let from: u16 = low.parse().map_err(|_| malformed())?;
            let to: u16 = high.parse().map_err(|_| malformed())?;
            if from >= to {
                return Err(malformed());
            }
            return Ok(Self::Range { from, to });
        }
        Err(malformed())
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(port) => write!(f, "{port}"),
            Self::Range { from, to } => write!(f, "{from}-{to}"),
            Self::All => f.write_str("all"),
        }
    }
}

impl Serialize for PortRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PortRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u16),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(raw) => raw.parse().map_err(D::Error::custom),
            Raw::Number(port) => Ok(Self::Single(port)),
        }
    }
}

/// Addresses, droplets, load balancers, and tags a rule applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTargets {
    /// Literal addresses or CIDR blocks.
    pub addresses: Vec<String>,
    /// Droplet ids.
    pub droplet_ids: Vec<u64>,
    /// Load balancer ids.
    pub load_balancer_ids: Vec<u64>,
    /// Tags selecting droplets.
    pub tags: Vec<String>,
}

/// A rule for traffic arriving at the droplets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundRule {
    /// Transport protocol.
    pub protocol: ConnectionProtocol,
    /// Matched ports.
    pub ports: PortRange,
    /// Where the traffic may come from.
    pub sources: RuleTargets,
}

/// A rule for traffic leaving the droplets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRule {
    /// Transport protocol.
    pub protocol: ConnectionProtocol,
    /// Matched ports.
    pub ports: PortRange,
    /// Where the traffic may go.
    pub destinations: RuleTargets,
}

/// A cloud firewall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firewall {
    /// Firewall id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Progress of applying the firewall.
    pub status: FirewallStatus,
    /// When the firewall was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Droplets still being changed.
    pub pending_changes: Vec<PendingChange>,
    /// Rules for arriving traffic.
    pub inbound_rules: Vec<InboundRule>,
    /// Rules for leaving traffic.
    pub outbound_rules: Vec<OutboundRule>,
    /// Droplets the firewall applies to.
    pub droplet_ids: Vec<u64>,
    /// Tags selecting further droplets.
    pub tags: Vec<String>,
}

impl Firewall {
    /// The firewall's mutable fields, for create and update bodies.
    #[must_use]
    pub fn params(&self) -> FirewallParams {
        FirewallParams {
            name: self.name.clone(),
            inbound_rules: self.inbound_rules.clone(),
            outbound_rules: self.outbound_rules.clone(),
            droplet_ids: self.droplet_ids.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// The writable subset of a firewall: everything the server does not assign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallParams {
    /// Display name.
    pub name: String,
    /// Rules for arriving traffic.
    pub inbound_rules: Vec<InboundRule>,
    /// Rules for leaving traffic.
    pub outbound_rules: Vec<OutboundRule>,
    /// Droplets the firewall applies to.
    pub droplet_ids: Vec<u64>,
    /// Tags selecting further droplets.
    pub tags: Vec<String>,
}

/// A batch of rules added to or removed from an existing firewall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    /// Rules for arriving traffic.
    pub inbound_rules: Vec<InboundRule>,
    /// Rules for leaving traffic.
    pub outbound_rules: Vec<OutboundRule>,
}

/// Response wrapper for a single firewall.
#[derive(Debug, Clone, Deserialize)]
pub struct FirewallResponse {
    /// The firewall.
    pub firewall: Firewall,
}

impl ApiResponse for FirewallResponse {}

/// Response wrapper for the firewall collection.
#[derive(Debug, Clone, Deserialize)]
pub struct FirewallsResponse {
    /// All firewalls on the account.
    pub firewalls: Vec<Firewall>,
}

impl ApiResponse for FirewallsResponse {}

/// Create a firewall.
#[derive(Debug, Clone)]
pub struct CreateFirewall {
    /// Firewall to create.
    pub firewall: FirewallParams,
}

impl Request for CreateFirewall {
    type Body = FirewallParams;
    type Response = FirewallResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "firewalls".to_string()
    }

    fn body(&self) -> Option<&FirewallParams> {
        Some(&self.firewall)
    }
}

/// Fetch a single firewall by id.
#[derive(Debug, Clone, Copy)]
pub struct GetFirewall {
    /// Firewall id.
    pub id: u64,
}

impl Request for GetFirewall {
    type Body = NoContent;
    type Response = FirewallResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("firewalls/{}", self.id)
    }
}

/// List all firewalls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFirewalls;

impl Request for ListFirewalls {
    type Body = NoContent;
    type Response = FirewallsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "firewalls".to_string()
    }
}

/// Replace a firewall's configuration wholesale.
#[derive(Debug, Clone)]
pub struct UpdateFirewall {
    /// Id of the firewall being replaced.
    pub id: u64,
    /// Replacement configuration.
    pub firewall: FirewallParams,
}

impl UpdateFirewall {
    /// Replace `firewall` with its current in-memory contents.
    #[must_use]
    pub fn new(firewall: &Firewall) -> Self {
        Self {
            id: firewall.id,
            firewall: firewall.params(),
        }
    }
}

impl Request for UpdateFirewall {
    type Body = FirewallParams;
    type Response = FirewallResponse;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("firewalls/{}", self.id)
    }

    fn body(&self) -> Option<&FirewallParams> {
        Some(&self.firewall)
    }
}

/// Delete a firewall.
#[derive(Debug, Clone, Copy)]
pub struct DeleteFirewall {
    /// Firewall id.
    pub id: u64,
}

impl Request for DeleteFirewall {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("firewalls/{}", self.id)
    }
}

/// Apply the firewall to droplets selected by the given tags.
#[derive(Debug, Clone, Serialize)]
pub struct AddFirewallTags {
    /// Firewall id.
    #[serde(skip)]
    pub id: u64,
    /// Tags to add.
    pub tags: Vec<String>,
}

impl Request for AddFirewallTags {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("firewalls/{}/tags", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Stop applying the firewall to droplets selected by the given tags.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveFirewallTags {
    /// Firewall id.
    #[serde(skip)]
    pub id: u64,
    /// Tags to remove.
    pub tags: Vec<String>,
}

impl Request for RemoveFirewallTags {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("firewalls/{}/tags", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Add rules to an existing firewall.
#[derive(Debug, Clone)]
pub struct AddFirewallRules {
    /// Firewall id.
    pub id: u64,
    /// Rules to add.
    pub rules: RuleSet,
}

impl Request for AddFirewallRules {
    type Body = RuleSet;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("firewalls/{}/rules", self.id)
    }

    fn body(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }
}

/// Remove rules from an existing firewall.
#[derive(Debug, Clone)]
pub struct RemoveFirewallRules {
    /// Firewall id.
    pub id: u64,
    /// Rules to remove.
    pub rules: RuleSet,
}

impl Request for RemoveFirewallRules {
    type Body = RuleSet;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("firewalls/{}/rules", self.id)
    }

    fn body(&self) -> Option<&RuleSet> {
        Some(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_range_parses_all_three_forms() {
        assert_eq!("8080".parse::<PortRange>().unwrap(), PortRange::Single(8080));
        assert_eq!(
            "8000-9000".parse::<PortRange>().unwrap(),
            PortRange::Range {
                from: 8000,
                to: 9000
            }
        );
        assert_eq!("all".parse::<PortRange>().unwrap(), PortRange::All);
    }

    #[test]
    fn port_range_rejects_malformed_strings() {
        for raw in ["", "10-", "-10", "10-9", "10-10", "1a", "80-90-100", "8 0"] {
            assert!(
                raw.parse::<PortRange>().is_err(),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn port_range_formats_are_the_parse_inverse() {
        for raw in ["22", "8000-9000", "all"] {
            let range: PortRange = raw.parse().unwrap();
            assert_eq!(range.to_string(), raw);
        }
    }

    #[test]
    fn port_range_decodes_bare_integers_too() {
        assert_eq!(
            serde_json::from_str::<PortRange>("8080").unwrap(),
            PortRange::Single(8080)
        );
        assert_eq!(
            serde_json::from_str::<PortRange>("\"8000-9000\"").unwrap(),
            PortRange::Range {
                from: 8000,
                to: 9000
            }
        );
        assert!(serde_json::from_str::<PortRange>("\"9000-8000\"").is_err());
    }

    #[test]
    fn port_range_encodes_as_a_string() {
        assert_eq!(
            serde_json::to_string(&PortRange::Single(22)).unwrap(),
            "\"22\""
        );
        assert_eq!(serde_json::to_string(&PortRange::All).unwrap(), "\"all\"");
    }

    #[test]
    fn tag_mutations_carry_a_body() {
        let request = AddFirewallTags {
            id: 83,
            tags: vec!["frontend".to_string()],
        };
        assert_eq!(request.path(), "firewalls/83/tags");
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"tags": ["frontend"]}));
    }

    #[test]
    fn rule_mutations_wrap_both_directions() {
        let rules = RuleSet {
            inbound_rules: vec![InboundRule {
                protocol: ConnectionProtocol::Tcp,
                ports: PortRange::Single(22),
                sources: RuleTargets {
                    addresses: vec!["0.0.0.0/0".to_string()],
                    droplet_ids: vec![],
                    load_balancer_ids: vec![],
                    tags: vec![],
                },
            }],
            outbound_rules: vec![],
        };
        let request = AddFirewallRules { id: 83, rules };
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(body["inbound_rules"][0]["protocol"], "tcp");
        assert_eq!(body["inbound_rules"][0]["ports"], "22");
    }
}
