//! Droplets: virtual machines.

use crate::droplet_action::DropletActionsResponse;
use crate::image::Image;
use crate::region::Region;
use crate::size::Size;
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::query::QueryParams;
use digitalocean_core::{ApiResponse, Method, NoContent, PagedRequest, Request};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a droplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropletStatus {
    /// Being provisioned.
    New,
    /// Running.
    Active,
    /// Powered off.
    Off,
    /// Archived.
    Archive,
}

/// An IPv4 interface attached to a droplet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipv4Network {
    /// Assigned address.
    pub ip_address: String,
    /// Netmask in dotted-quad form.
    pub netmask: String,
    /// Gateway address.
    pub gateway: String,
    /// Interface kind (`public` or `private`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// An IPv6 interface attached to a droplet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipv6Network {
    /// Assigned address.
    pub ip_address: String,
    /// Prefix length.
    pub netmask: u32,
    /// Gateway address.
    pub gateway: String,
    /// Interface kind (`public` or `private`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Network interfaces grouped by address family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Networks {
    /// IPv4 interfaces.
    pub v4: Vec<Ipv4Network>,
    /// IPv6 interfaces.
    pub v6: Vec<Ipv6Network>,
}

/// A kernel available to a droplet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kernel {
    /// Kernel id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Version string.
    pub version: String,
}

/// Scheduled window for the next automatic backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupWindow {
    /// Window opens.
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    /// Window closes.
    #[serde(with = "timestamp")]
    pub end: DateTime<Utc>,
}

/// Image selector: public images go by slug, private ones by id.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ImageIdentifier {
    /// Numeric image id.
    Id(u64),
    /// Public image slug.
    Slug(String),
}

/// A virtual machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    /// Droplet id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Memory in MiB.
    pub memory: u32,
    /// Number of virtual CPUs.
    pub vcpus: u32,
    /// Disk in GiB.
    pub disk: u32,
    /// Whether the droplet is locked against actions.
    pub locked: bool,
    /// When the droplet was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: DropletStatus,
    /// Ids of automatic backups.
    pub backup_ids: Vec<u64>,
    /// Ids of snapshots taken from this droplet.
    pub snapshot_ids: Vec<u64>,
    /// Enabled feature flags.
    pub features: Vec<String>,
    /// Region the droplet runs in.
    pub region: Region,
    /// Image the droplet was created from.
    pub image: Image,
    /// Size the droplet runs at.
    pub size: Size,
    /// Size slug, duplicated for convenience.
    pub size_slug: String,
    /// Attached network interfaces.
    pub networks: Networks,
    /// Running kernel, for droplets with managed kernels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<Kernel>,
    /// Next automatic backup window, when backups are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_backup_window: Option<BackupWindow>,
    /// Tags applied to the droplet.
    pub tags: Vec<String>,
    /// Ids of attached block storage volumes.
    pub volume_ids: Vec<u64>,
}

/// Response wrapper for a single droplet.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletResponse {
    /// The droplet.
    pub droplet: Droplet,
}

impl ApiResponse for DropletResponse {}

/// Response wrapper for the droplet collection.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletsResponse {
    /// Matching droplets.
    pub droplets: Vec<Droplet>,
}

impl ApiResponse for DropletsResponse {}

/// Response wrapper for a droplet's kernels.
#[derive(Debug, Clone, Deserialize)]
pub struct KernelsResponse {
    /// Available kernels.
    pub kernels: Vec<Kernel>,
}

impl ApiResponse for KernelsResponse {}

/// Response wrapper for a droplet's snapshot images.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletSnapshotsResponse {
    /// Snapshot images taken from the droplet.
    pub snapshots: Vec<Image>,
}

impl ApiResponse for DropletSnapshotsResponse {}

/// Response wrapper for a droplet's backup images.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletBackupsResponse {
    /// Backup images taken from the droplet.
    pub backups: Vec<Image>,
}

impl ApiResponse for DropletBackupsResponse {}

/// Create a droplet.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDroplet {
    /// Display name.
    pub name: String,
    /// Region slug to create in.
    pub region: String,
    /// Size slug to create at.
    pub size: String,
    /// Image to create from.
    pub image: ImageIdentifier,
    /// SSH key ids or fingerprints to install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_keys: Option<Vec<String>>,
    /// Enable automatic backups.
    pub backups: bool,
    /// Enable IPv6.
    pub ipv6: bool,
    /// Enable private networking.
    pub private_networking: bool,
    /// Cloud-init user data.
    pub user_data: String,
    /// Enable the monitoring agent.
    pub monitoring: bool,
    /// Ids of volumes to attach at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<u64>>,
    /// Tags to apply at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Request for CreateDroplet {
    type Body = Self;
    type Response = DropletResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "droplets".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single droplet by id.
#[derive(Debug, Clone, Copy)]
pub struct GetDroplet {
    /// Droplet id.
    pub id: u64,
}

impl Request for GetDroplet {
    type Body = NoContent;
    type Response = DropletResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}", self.id)
    }
}

/// List droplets, optionally narrowed to one tag.
#[derive(Debug, Clone)]
pub struct ListDroplets {
    /// Restrict results to droplets carrying this tag.
    pub tag: Option<String>,
    /// Page index to fetch.
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl Default for ListDroplets {
    fn default() -> Self {
        Self {
            tag: None,
            page: 0,
            per_page: 200,
        }
    }
}

impl Request for ListDroplets {
    type Body = NoContent;
    type Response = DropletsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "droplets".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("per_page", self.per_page);
        params.push_opt("tag", self.tag.as_deref());
        params.into_query()
    }
}

impl PagedRequest for ListDroplets {
    fn page(&self) -> u32 {
        self.page
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// List kernels available to a droplet.
#[derive(Debug, Clone, Copy)]
pub struct ListDropletKernels {
    /// Droplet id.
    pub id: u64,
}

impl Request for ListDropletKernels {
    type Body = NoContent;
    type Response = KernelsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}/kernels", self.id)
    }
}

/// List snapshot images taken from a droplet.
#[derive(Debug, Clone, Copy)]
pub struct ListDropletSnapshots {
    /// Droplet id.
    pub id: u64,
}

impl Request for ListDropletSnapshots {
    type Body = NoContent;
    type Response = DropletSnapshotsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}/snapshots", self.id)
    }
}

/// List backup images taken from a droplet.
#[derive(Debug, Clone, Copy)]
pub struct ListDropletBackups {
    /// Droplet id.
    pub id: u64,
}

impl Request for ListDropletBackups {
    type Body = NoContent;
    type Response = DropletBackupsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}/backups", self.id)
    }
}

/// List actions performed on a droplet.
#[derive(Debug, Clone, Copy)]
pub struct ListDropletActions {
    /// Droplet id.
    pub id: u64,
}

impl Request for ListDropletActions {
    type Body = NoContent;
    type Response = DropletActionsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }
}

/// Delete a droplet.
#[derive(Debug, Clone, Copy)]
pub struct DeleteDroplet {
    /// Droplet id.
    pub id: u64,
}

impl Request for DeleteDroplet {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("droplets/{}", self.id)
    }
}

/// Delete every droplet carrying a tag.
#[derive(Debug, Clone)]
pub struct DeleteDropletsByTag {
    /// Tag selecting the droplets.
    pub tag: String,
}

impl Request for DeleteDropletsByTag {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        "droplets".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push("tag", &self.tag);
        params.into_query()
    }
}

/// List droplets sharing physical hardware with the given one.
#[derive(Debug, Clone, Copy)]
pub struct ListDropletNeighbors {
    /// Droplet id.
    pub id: u64,
}

impl Request for ListDropletNeighbors {
    type Body = NoContent;
    type Response = DropletsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}/neighbors", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_identifier_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(ImageIdentifier::Id(6918990)).unwrap(),
            serde_json::json!(6918990)
        );
        assert_eq!(
            serde_json::to_value(ImageIdentifier::Slug("ubuntu-24-04-x64".to_string())).unwrap(),
            serde_json::json!("ubuntu-24-04-x64")
        );
    }

    #[test]
    fn create_body_skips_absent_options() {
        let request = CreateDroplet {
            name: "example.com".to_string(),
            region: "nyc3".to_string(),
            size: "s-1vcpu-1gb".to_string(),
            image: ImageIdentifier::Slug("ubuntu-24-04-x64".to_string()),
            ssh_keys: None,
            backups: false,
            ipv6: true,
            private_networking: false,
            user_data: String::new(),
            monitoring: true,
            volumes: None,
            tags: Some(vec!["web".to_string()]),
        };
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert!(body.get("ssh_keys").is_none());
        assert!(body.get("volumes").is_none());
        assert_eq!(body["tags"], serde_json::json!(["web"]));
        assert_eq!(body["image"], serde_json::json!("ubuntu-24-04-x64"));
    }

    #[test]
    fn list_folds_paging_and_tag_into_the_query() {
        let request = ListDroplets {
            tag: Some("web".to_string()),
            page: 2,
            per_page: 25,
        };
        let query = request.query().unwrap();
        assert_eq!(query["page"], "2");
        assert_eq!(query["per_page"], "25");
        assert_eq!(query["tag"], "web");
        assert_eq!(request.page(), 2);
        assert_eq!(request.per_page(), 25);
    }

    #[test]
    fn delete_by_tag_uses_the_collection_path() {
        let request = DeleteDropletsByTag {
            tag: "staging".to_string(),
        };
        assert_eq!(request.path(), "droplets");
        assert_eq!(request.query().unwrap()["tag"], "staging");
    }
}
