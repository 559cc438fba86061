//! Volume actions: attach, detach, and resize.
//!
//! Attach and detach come in two flavors: by volume id against the volume's
//! own actions collection, or by volume name against the account-wide
//! `volumes/actions` collection.

use crate::action::ActionStatus;
use crate::region::Region;
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Kind of volume action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeActionType {
    /// Volume attached to a droplet.
    AttachVolume,
    /// Volume detached from a droplet.
    DetachVolume,
    /// Volume grown to a new size.
    Resize,
}

/// A recorded volume action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAction {
    /// Action id.
    pub id: u64,
    /// Progress of the action.
    pub status: ActionStatus,
    /// Kind of action.
    #[serde(rename = "type")]
    pub kind: VolumeActionType,
    /// When the action started.
    #[serde(with = "timestamp")]
    pub started_at: DateTime<Utc>,
    /// When the action finished.
    #[serde(with = "timestamp")]
    pub completed_at: DateTime<Utc>,
    /// Id of the resource acted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    /// Kind of resource acted on.
    pub resource_type: String,
    /// Region the action ran in.
    pub region: Region,
    /// Region slug, when reported separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_slug: Option<String>,
}

/// Response wrapper for a single volume action.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeActionResponse {
    /// The recorded action.
    pub action: VolumeAction,
}

impl ApiResponse for VolumeActionResponse {}

/// Response wrapper for a volume's action history.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeActionsResponse {
    /// Recorded actions.
    pub actions: Vec<VolumeAction>,
}

impl ApiResponse for VolumeActionsResponse {}

/// Attach a volume to a droplet by volume id.
#[derive(Debug, Clone, Serialize)]
pub struct AttachVolume {
    /// Volume id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: &'static str,
    /// Droplet to attach to.
    pub droplet_id: u64,
    /// Region both resources live in.
    pub region: String,
}

impl AttachVolume {
    /// Attach the volume to the given droplet.
    #[must_use]
    pub fn new(id: u64, droplet_id: u64, region: impl Into<String>) -> Self {
        Self {
            id,
            kind: "attach",
            droplet_id,
            region: region.into(),
        }
    }
}

impl Request for AttachVolume {
    type Body = Self;
    type Response = VolumeActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("volumes/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Attach a volume to a droplet by volume name.
#[derive(Debug, Clone, Serialize)]
pub struct AttachVolumeByName {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Droplet to attach to.
    pub droplet_id: u64,
    /// Region both resources live in.
    pub region: String,
    /// Volume name.
    pub name: String,
}

impl AttachVolumeByName {
    /// Attach the named volume to the given droplet.
    #[must_use]
    pub fn new(name: impl Into<String>, droplet_id: u64, region: impl Into<String>) -> Self {
        Self {
            kind: "attach",
            droplet_id,
            region: region.into(),
            name: name.into(),
        }
    }
}

impl Request for AttachVolumeByName {
    type Body = Self;
    type Response = VolumeActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "volumes/actions".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Detach a volume from a droplet by volume id.
#[derive(Debug, Clone, Serialize)]
pub struct DetachVolume {
    /// Volume id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: &'static str,
    /// Droplet to detach from.
    pub droplet_id: u64,
    /// Region both resources live in.
    pub region: String,
}

impl DetachVolume {
    /// Detach the volume from the given droplet.
    #[must_use]
    pub fn new(id: u64, droplet_id: u64, region: impl Into<String>) -> Self {
        Self {
            id,
            kind: "detach",
            droplet_id,
            region: region.into(),
        }
    }
}

impl Request for DetachVolume {
    type Body = Self;
    type Response = VolumeActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("volumes/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Detach a volume from a droplet by volume name.
#[derive(Debug, Clone, Serialize)]
pub struct DetachVolumeByName {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Droplet to detach from.
    pub droplet_id: u64,
    /// Region both resources live in.
    pub region: String,
    /// Volume name.
    pub name: String,
}

impl DetachVolumeByName {
    /// Detach the named volume from the given droplet.
    #[must_use]
    pub fn new(name: impl Into<String>, droplet_id: u64, region: impl Into<String>) -> Self {
        Self {
            kind: "detach",
            droplet_id,
            region: region.into(),
            name: name.into(),
        }
    }
}

impl Request for DetachVolumeByName {
    type Body = Self;
    type Response = VolumeActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "volumes/actions".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Grow a volume to a new size.
#[derive(Debug, Clone, Serialize)]
pub struct ResizeVolume {
    /// Volume id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: &'static str,
    /// New capacity in GiB.
    pub size_gigabytes: f64,
    /// Region the volume lives in.
    pub region: String,
}

impl ResizeVolume {
    /// Resize the volume to the given capacity.
    #[must_use]
    pub fn new(id: u64, size_gigabytes: f64, region: impl Into<String>) -> Self {
        Self {
            id,
            kind: "resize",
            size_gigabytes,
            region: region.into(),
        }
    }
}

impl Request for ResizeVolume {
    type Body = Self;
    type Response = VolumeActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("volumes/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// List actions performed on a volume.
#[derive(Debug, Clone, Copy)]
pub struct ListVolumeActions {
    /// Volume id.
    pub id: u64,
}

impl Request for ListVolumeActions {
    type Body = NoContent;
    type Response = VolumeActionsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("volumes/{}/actions", self.id)
    }
}

/// Fetch a single volume action.
#[derive(Debug, Clone, Copy)]
pub struct GetVolumeAction {
    /// Volume id.
    pub id: u64,
    /// Action id.
    pub action_id: u64,
}

impl Request for GetVolumeAction {
    type Body = NoContent;
    type Response = VolumeActionResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("volumes/{}/actions/{}", self.id, self.action_id)
    }
}
