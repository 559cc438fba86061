//! Droplet and volume snapshots.

use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::query::QueryParams;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of resource a snapshot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotType {
    /// Snapshot of a droplet.
    Droplet,
    /// Snapshot of a block storage volume.
    Volume,
}

impl SnapshotType {
    /// Wire value used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Droplet => "droplet",
            Self::Volume => "volume",
        }
    }
}

/// A saved snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// When the snapshot was taken.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Regions the snapshot is available in.
    pub regions: Vec<String>,
    /// Id of the source resource.
    pub resource_id: u64,
    /// Kind of the source resource.
    pub resource_type: SnapshotType,
    /// Minimum disk in GiB needed to restore.
    pub min_disk_size: u32,
    /// Snapshot size in GiB. Documented as an integer, returned fractional.
    pub size_gigabytes: f64,
}

/// Response wrapper for the snapshot collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotsResponse {
    /// Matching snapshots.
    pub snapshots: Vec<Snapshot>,
}

impl ApiResponse for SnapshotsResponse {}

/// Response wrapper for a single snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    /// The snapshot.
    pub snapshot: Snapshot,
}

impl ApiResponse for SnapshotResponse {}

/// List snapshots, optionally narrowed to one resource kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSnapshots {
    /// Restrict results to snapshots of this kind.
    pub resource_type: Option<SnapshotType>,
}

impl Request for ListSnapshots {
    type Body = NoContent;
    type Response = SnapshotsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "snapshots".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push_opt("resource_type", self.resource_type.map(SnapshotType::as_str));
        params.into_query()
    }
}

/// Fetch a single snapshot by id.
#[derive(Debug, Clone, Copy)]
pub struct GetSnapshot {
    /// Snapshot id.
    pub id: u64,
}

impl Request for GetSnapshot {
    type Body = NoContent;
    type Response = SnapshotResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("snapshots/{}", self.id)
    }
}

/// Delete a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DeleteSnapshot {
    /// Snapshot id.
    pub id: u64,
}

impl Request for DeleteSnapshot {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("snapshots/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_is_absent_without_a_filter() {
        assert!(ListSnapshots::default().query().is_none());
    }

    #[test]
    fn list_query_carries_the_resource_type() {
        let request = ListSnapshots {
            resource_type: Some(SnapshotType::Volume),
        };
        let query = request.query().unwrap();
        assert_eq!(query["resource_type"], "volume");
    }
}
