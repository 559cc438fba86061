//! Block storage volumes.

use crate::region::Region;
use crate::snapshot::{SnapshotResponse, SnapshotsResponse};
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::query::QueryParams;
use digitalocean_core::{ApiResponse, Method, NoContent, PagedRequest, Request};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filesystem a volume is formatted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilesystemType {
    /// ext4.
    Ext4,
    /// XFS.
    Xfs,
}

/// A block storage volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume id.
    pub id: u64,
    /// Region the volume lives in.
    pub region: Region,
    /// Ids of droplets the volume is attached to.
    pub droplet_ids: Vec<u64>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capacity in GiB.
    pub size_gigabytes: u32,
    /// When the volume was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Filesystem the volume is formatted with.
    pub filesystem_type: FilesystemType,
    /// Filesystem label.
    pub filesystem_label: String,
}

/// Response wrapper for a single volume.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeResponse {
    /// The volume.
    pub volume: Volume,
}

impl ApiResponse for VolumeResponse {}

/// Response wrapper for the volume collection.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumesResponse {
    /// Matching volumes.
    pub volumes: Vec<Volume>,
}

impl ApiResponse for VolumesResponse {}

/// List volumes, optionally narrowed to one region.
#[derive(Debug, Clone, Default)]
pub struct ListVolumes {
    /// Restrict results to this region slug.
    pub region: Option<String>,
}

impl Request for ListVolumes {
    type Body = NoContent;
    type Response = VolumesResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "volumes".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push_opt("region", self.region.as_deref());
        params.into_query()
    }
}

/// Create a volume, either blank in a region or from a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVolume {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capacity in GiB.
    pub size_gigabytes: u32,
    /// Region to create in. Exactly one of `region` and `snapshot_id`
    /// should be supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Snapshot to create from.
    #[serde(rename = "snapshot_id", skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<u64>,
    /// Filesystem to pre-format with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem_type: Option<FilesystemType>,
    /// Label for the pre-formatted filesystem; only meaningful together
    /// with `filesystem_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem_label: Option<String>,
}

impl Request for CreateVolume {
    type Body = Self;
    type Response = VolumeResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "volumes".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single volume by id.
#[derive(Debug, Clone, Copy)]
pub struct GetVolume {
    /// Volume id.
    pub id: u64,
}

impl Request for GetVolume {
    type Body = NoContent;
    type Response = VolumeResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("volumes/{}", self.id)
    }
}

/// Look up volumes by name within a region.
#[derive(Debug, Clone)]
pub struct GetVolumeByName {
    /// Volume name.
    pub name: String,
    /// Region slug the volume lives in.
    pub region: String,
}

impl Request for GetVolumeByName {
    type Body = NoContent;
    type Response = VolumesResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "volumes".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push("name", &self.name);
        params.push("region", &self.region);
        params.into_query()
    }
}

/// List snapshots taken from a volume.
#[derive(Debug, Clone, Copy)]
pub struct ListVolumeSnapshots {
    /// Volume id.
    pub id: u64,
    /// Page index to fetch.
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl ListVolumeSnapshots {
    /// List snapshots of the given volume with default paging.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            page: 0,
            per_page: 200,
        }
    }
}

impl Request for ListVolumeSnapshots {
    type Body = NoContent;
    type Response = SnapshotsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("volumes/{}/snapshots", self.id)
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("per_page", self.per_page);
        params.into_query()
    }
}

impl PagedRequest for ListVolumeSnapshots {
    fn page(&self) -> u32 {
        self.page
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// Take a named snapshot of a volume.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVolumeSnapshot {
    /// Volume id; also posted in the body alongside the name.
    pub id: u64,
    /// Name for the snapshot.
    pub name: String,
}

impl Request for CreateVolumeSnapshot {
    type Body = Self;
    type Response = SnapshotResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("volumes/{}/snapshots", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Delete a volume.
#[derive(Debug, Clone, Copy)]
pub struct DeleteVolume {
    /// Volume id.
    pub id: u64,
}

impl Request for DeleteVolume {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("volumes/{}", self.id)
    }
}

/// Delete a volume selected by name within a region.
#[derive(Debug, Clone)]
pub struct DeleteVolumeByName {
    /// Volume name.
    pub name: String,
    /// Region slug the volume lives in.
    pub region: String,
}

impl Request for DeleteVolumeByName {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        "volumes".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push("name", &self.name);
        params.push("region", &self.region);
        params.into_query()
    }
}
