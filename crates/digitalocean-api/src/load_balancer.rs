//! Load balancers.

use crate::region::Region;
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Traffic distribution algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Rotate across the pool.
    #[serde(rename = "round_robin")]
    RoundRobin,
    /// Prefer the droplet with the fewest open connections.
    #[serde(rename = "least_connection")]
    LeastConnections,
}

/// Lifecycle state of a load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerStatus {
    /// Being provisioned.
    New,
    /// Serving traffic.
    Active,
    /// Provisioning failed.
    Errored,
}

/// Protocol a forwarding rule speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardingProtocol {
    /// Plain HTTP.
    Http,
    /// HTTPS.
    Https,
    /// HTTP/2.
    Http2,
    /// Raw TCP.
    Tcp,
}

/// Mapping from an entry port on the balancer to a target port on the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardingRule {
    /// Protocol accepted at the balancer.
    pub entry_protocol: ForwardingProtocol,
    /// Port accepted at the balancer.
    pub entry_port: u16,
    /// Protocol spoken to the pool.
    pub target_protocol: ForwardingProtocol,
    /// Port spoken to on the pool.
    pub target_port: u16,
    /// Certificate used to terminate TLS, if any.
    pub certificate_id: String,
    /// Pass TLS through to the pool without terminating.
    pub tls_passthrough: bool,
}

/// Protocol used for health probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthProtocol {
    /// HTTP probe against a path.
    Http,
    /// Plain TCP connect.
    Tcp,
}

/// How pool members are probed for health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Probe protocol.
    pub protocol: HealthProtocol,
    /// Probe port.
    pub port: u16,
    /// Probe path, for HTTP probes.
    pub path: String,
    /// Seconds between probes.
    pub check_interval_seconds: u32,
    /// Seconds before a probe counts as failed.
    pub response_timeout_seconds: u32,
    /// Failures before a member is pulled.
    pub unhealthy_threshold: u32,
    /// Successes before a member is restored.
    pub healthy_threshold: u32,
}

/// Session stickiness behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickySessionsType {
    /// No stickiness.
    None,
    /// Cookie-based stickiness.
    Cookies,
}

/// Session stickiness configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickySessions {
    /// Stickiness behavior.
    #[serde(rename = "type")]
    pub kind: StickySessionsType,
    /// Cookie name, for cookie stickiness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
    /// Cookie lifetime in seconds, for cookie stickiness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_ttl_seconds: Option<String>,
}

/// A load balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    /// Load balancer id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Public address.
    pub ip: String,
    /// Traffic distribution algorithm.
    pub algorithm: Algorithm,
    /// Lifecycle state.
    pub status: LoadBalancerStatus,
    /// When the balancer was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Port mappings.
    pub forwarding_rules: Vec<ForwardingRule>,
    /// Health probing configuration.
    pub health_check: HealthCheck,
    /// Session stickiness configuration.
    pub sticky_sessions: StickySessions,
    /// Region the balancer runs in.
    pub region: Region,
    /// Tag selecting the pool, when tag-managed.
    pub tag: String,
    /// Explicit pool membership.
    pub droplet_ids: Vec<u64>,
    /// Redirect plain HTTP to HTTPS.
    pub redirect_http_to_https: bool,
}

impl LoadBalancer {
    /// The balancer's mutable fields, for create and update bodies.
    #[must_use]
    pub fn params(&self) -> LoadBalancerParams {
        LoadBalancerParams {
            name: self.name.clone(),
            algorithm: self.algorithm,
            region: self.region.slug.clone(),
            forwarding_rules: self.forwarding_rules.clone(),
            health_check: self.health_check.clone(),
            sticky_sessions: self.sticky_sessions.clone(),
            redirect_http_to_https: self.redirect_http_to_https,
            tag: None,
            droplet_ids: Some(self.droplet_ids.clone()),
        }
    }
}

/// The writable subset of a load balancer.
///
/// Exactly one of `tag` and `droplet_ids` should be supplied; use
/// [`for_tag`](Self::for_tag) or [`for_droplets`](Self::for_droplets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerParams {
    /// Display name.
    pub name: String,
    /// Traffic distribution algorithm.
    pub algorithm: Algorithm,
    /// Region slug to run in.
    pub region: String,
    /// Port mappings.
    pub forwarding_rules: Vec<ForwardingRule>,
    /// Health probing configuration.
    pub health_check: HealthCheck,
    /// Session stickiness configuration.
    pub sticky_sessions: StickySessions,
    /// Redirect plain HTTP to HTTPS.
    pub redirect_http_to_https: bool,
    /// Tag selecting the pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Explicit pool membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplet_ids: Option<Vec<u64>>,
}

impl LoadBalancerParams {
    /// Configuration for a pool selected by tag.
    #[must_use]
    pub fn for_tag(
        name: impl Into<String>,
        algorithm: Algorithm,
        region: impl Into<String>,
        forwarding_rules: Vec<ForwardingRule>,
        health_check: HealthCheck,
        sticky_sessions: StickySessions,
        redirect_http_to_https: bool,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            algorithm,
            region: region.into(),
            forwarding_rules,
            health_check,
            sticky_sessions,
            redirect_http_to_https,
            tag: Some(tag.into()),
            droplet_ids: None,
        }
    }

    /// Configuration for an explicitly enumerated pool.
    #[must_use]
    pub fn for_droplets(
        name: impl Into<String>,
        algorithm: Algorithm,
        region: impl Into<String>,
        forwarding_rules: Vec<ForwardingRule>,
        health_check: HealthCheck,
        sticky_sessions: StickySessions,
        redirect_http_to_https: bool,
        droplet_ids: Vec<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            algorithm,
            region: region.into(),
            forwarding_rules,
            health_check,
            sticky_sessions,
            redirect_http_to_https,
            tag: None,
            droplet_ids: Some(droplet_ids),
        }
    }
}

/// Response wrapper for a single load balancer.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadBalancerResponse {
    /// The load balancer.
    pub load_balancer: LoadBalancer,
}

impl ApiResponse for LoadBalancerResponse {}

/// Response wrapper for the load balancer collection.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadBalancersResponse {
    /// All load balancers on the account.
    pub load_balancers: Vec<LoadBalancer>,
}

impl ApiResponse for LoadBalancersResponse {}

/// Create a load balancer.
#[derive(Debug, Clone)]
pub struct CreateLoadBalancer {
    /// Configuration to create with.
    pub load_balancer: LoadBalancerParams,
}

impl Request for CreateLoadBalancer {
    type Body = LoadBalancerParams;
    type Response = LoadBalancerResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "load_balancers".to_string()
    }

    fn body(&self) -> Option<&LoadBalancerParams> {
        Some(&self.load_balancer)
    }
}

/// Fetch a single load balancer by id.
#[derive(Debug, Clone, Copy)]
pub struct GetLoadBalancer {
    /// Load balancer id.
    pub id: u64,
}

impl Request for GetLoadBalancer {
    type Body = NoContent;
    type Response = LoadBalancerResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("load_balancers/{}", self.id)
    }
}

/// List all load balancers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListLoadBalancers;

impl Request for ListLoadBalancers {
    type Body = NoContent;
    type Response = LoadBalancersResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "load_balancers".to_string()
    }
}

/// Replace a load balancer's configuration wholesale.
#[derive(Debug, Clone)]
pub struct UpdateLoadBalancer {
    /// Id of the balancer being replaced.
    pub id: u64,
    /// Replacement configuration.
    pub load_balancer: LoadBalancerParams,
}

impl UpdateLoadBalancer {
    /// Replace `load_balancer` with its current in-memory contents.
    #[must_use]
    pub fn new(load_balancer: &LoadBalancer) -> Self {
        Self {
            id: load_balancer.id,
            load_balancer: load_balancer.params(),
        }
    }
}

impl Request for UpdateLoadBalancer {
    type Body = LoadBalancerParams;
    type Response = LoadBalancerResponse;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("load_balancers/{}", self.id)
    }

    fn body(&self) -> Option<&LoadBalancerParams> {
        Some(&self.load_balancer)
    }
}

/// Delete a load balancer.
#[derive(Debug, Clone, Copy)]
pub struct DeleteLoadBalancer {
    /// Load balancer id.
    pub id: u64,
}

impl Request for DeleteLoadBalancer {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("load_balancers/{}", self.id)
    }
}

/// Add droplets to an explicitly managed pool.
#[derive(Debug, Clone, Serialize)]
pub struct AddLoadBalancerDroplets {
    /// Load balancer id.
    #[serde(skip)]
    pub id: u64,
    /// Droplets to add.
    pub droplet_ids: Vec<u64>,
}

impl Request for AddLoadBalancerDroplets {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("load_balancers/{}/droplets", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Remove droplets from an explicitly managed pool.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveLoadBalancerDroplets {
    /// Load balancer id.
    #[serde(skip)]
    pub id: u64,
    /// Droplets to remove.
    pub droplet_ids: Vec<u64>,
}

impl Request for RemoveLoadBalancerDroplets {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("load_balancers/{}/droplets", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Add forwarding rules to a load balancer.
#[derive(Debug, Clone, Serialize)]
pub struct AddForwardingRules {
    /// Load balancer id.
    #[serde(skip)]
    pub id: u64,
    /// Rules to add.
    pub forwarding_rules: Vec<ForwardingRule>,
}

impl Request for AddForwardingRules {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("load_balancers/{}/forwarding_rules", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Remove forwarding rules from a load balancer.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveForwardingRules {
    /// Load balancer id.
    #[serde(skip)]
    pub id: u64,
    /// Rules to remove.
    pub forwarding_rules: Vec<ForwardingRule>,
}

impl Request for RemoveForwardingRules {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("load_balancers/{}/forwarding_rules", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn https_rule() -> ForwardingRule {
        ForwardingRule {
            entry_protocol: ForwardingProtocol::Https,
            entry_port: 443,
            target_protocol: ForwardingProtocol::Http,
            target_port: 80,
            certificate_id: "a-b-c".to_string(),
            tls_passthrough: false,
        }
    }

    #[test]
    fn algorithm_uses_the_singular_wire_name() {
        assert_eq!(
            serde_json::to_string(&Algorithm::LeastConnections).unwrap(),
            "\"least_connection\""
        );
    }

    #[test]
    fn params_require_exactly_one_pool_selector() {
        let body = serde_json::to_value(LoadBalancerParams::for_tag(
            "web-lb",
            Algorithm::RoundRobin,
            "nyc3",
            vec![https_rule()],
            HealthCheck {
                protocol: HealthProtocol::Http,
                port: 80,
                path: "/".to_string(),
                check_interval_seconds: 10,
                response_timeout_seconds: 5,
                unhealthy_threshold: 3,
                healthy_threshold: 5,
            },
            StickySessions {
                kind: StickySessionsType::None,
                cookie_name: None,
                cookie_ttl_seconds: None,
            },
            true,
            "web",
        ))
        .unwrap();
        assert_eq!(body["tag"], "web");
        assert!(body.get("droplet_ids").is_none());
        assert_eq!(body["forwarding_rules"][0]["entry_protocol"], "https");
    }

    #[test]
    fn droplet_mutations_carry_a_body() {
        let request = AddLoadBalancerDroplets {
            id: 91,
            droplet_ids: vec![3164444, 3164445],
        };
        assert_eq!(request.path(), "load_balancers/91/droplets");
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"droplet_ids": [3164444, 3164445]}));
    }

    #[test]
    fn rule_mutations_wrap_the_rule_list() {
        let request = AddForwardingRules {
            id: 91,
            forwarding_rules: vec![https_rule()],
        };
        assert_eq!(request.path(), "load_balancers/91/forwarding_rules");
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(body["forwarding_rules"][0]["entry_port"], 443);
    }
}
