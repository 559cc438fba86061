//! Droplet actions: reboots, resizes, snapshots, and friends.
//!
//! Every action posts a typed `{"type": …}` body to the droplet's actions
//! collection and returns the recorded action.

use crate::action::ActionStatus;
use crate::droplet::ImageIdentifier;
use crate::region::Region;
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Kind of droplet action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropletActionType {
    /// Turn on automatic backups.
    EnableBackups,
    /// Turn off automatic backups.
    DisableBackups,
    /// Graceful reboot.
    Reboot,
    /// Hard power cycle.
    PowerCycle,
    /// Graceful shutdown.
    Shutdown,
    /// Hard power off.
    PowerOff,
    /// Power on.
    PowerOn,
    /// Restore from a backup image.
    Restore,
    /// Reset the root password.
    PasswordReset,
    /// Resize to another size slug.
    Resize,
    /// Rebuild from an image.
    Rebuild,
    /// Rename.
    Rename,
    /// Switch the managed kernel.
    ChangeKernel,
    /// Enable IPv6 networking.
    EnableIpv6,
    /// Enable private networking.
    EnablePrivateNetworking,
    /// Take a snapshot.
    Snapshot,
}

/// A recorded droplet action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropletAction {
    /// Action id.
    pub id: u64,
    /// Progress of the action.
    pub status: ActionStatus,
    /// Kind of action.
    #[serde(rename = "type")]
    pub kind: DropletActionType,
    /// When the action started.
    #[serde(with = "timestamp")]
    pub started_at: DateTime<Utc>,
    /// When the action finished.
    #[serde(with = "timestamp")]
    pub completed_at: DateTime<Utc>,
    /// Id of the droplet acted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    /// Kind of resource acted on (always `droplet` here).
    pub resource_type: String,
    /// Region the action ran in.
    pub region: Region,
    /// Region slug, when reported separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_slug: Option<String>,
}

/// Response wrapper for a single droplet action.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletActionResponse {
    /// The recorded action.
    pub action: DropletAction,
}

impl ApiResponse for DropletActionResponse {}

/// Response wrapper for a droplet's action history.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletActionsResponse {
    /// Recorded actions, newest first.
    pub actions: Vec<DropletAction>,
}

impl ApiResponse for DropletActionsResponse {}

/// Turn on automatic backups.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnableDropletBackups {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl EnableDropletBackups {
    /// Enable backups for the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::EnableBackups,
        }
    }
}

impl Request for EnableDropletBackups {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Turn off automatic backups.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisableDropletBackups {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl DisableDropletBackups {
    /// Disable backups for the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::DisableBackups,
        }
    }
}

impl Request for DisableDropletBackups {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Gracefully reboot a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RebootDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl RebootDroplet {
    /// Reboot the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::Reboot,
        }
    }
}

impl Request for RebootDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Hard power-cycle a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerCycleDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl PowerCycleDroplet {
    /// Power-cycle the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::PowerCycle,
        }
    }
}

impl Request for PowerCycleDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Gracefully shut down a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShutdownDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl ShutdownDroplet {
    /// Shut down the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::Shutdown,
        }
    }
}

impl Request for ShutdownDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Hard power off a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerOffDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl PowerOffDroplet {
    /// Power off the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::PowerOff,
        }
    }
}

impl Request for PowerOffDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Power on a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerOnDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl PowerOnDroplet {
    /// Power on the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::PowerOn,
        }
    }
}

impl Request for PowerOnDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Restore a droplet from a backup image.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
    /// Image to restore from.
    pub image: ImageIdentifier,
}

impl RestoreDroplet {
    /// Restore the droplet from the given image.
    #[must_use]
    pub const fn new(id: u64, image: ImageIdentifier) -> Self {
        Self {
            id,
            kind: DropletActionType::Restore,
            image,
        }
    }
}

impl Request for RestoreDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Reset the root password of a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResetDropletPassword {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl ResetDropletPassword {
    /// Reset the password of the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::PasswordReset,
        }
    }
}

impl Request for ResetDropletPassword {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Resize a droplet to another size slug.
#[derive(Debug, Clone, Serialize)]
pub struct ResizeDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
    /// Also grow the disk (irreversible).
    pub disk: bool,
    /// Target size slug.
    pub size: String,
}

impl ResizeDroplet {
    /// Resize the droplet to the given size slug.
    #[must_use]
    pub fn new(id: u64, size: impl Into<String>, disk: bool) -> Self {
        Self {
            id,
            kind: DropletActionType::Resize,
            disk,
            size: size.into(),
        }
    }
}

impl Request for ResizeDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Rebuild a droplet from an image.
#[derive(Debug, Clone, Serialize)]
pub struct RebuildDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
    /// Image to rebuild from.
    pub image: ImageIdentifier,
}

impl RebuildDroplet {
    /// Rebuild the droplet from the given image.
    #[must_use]
    pub const fn new(id: u64, image: ImageIdentifier) -> Self {
        Self {
            id,
            kind: DropletActionType::Rebuild,
            image,
        }
    }
}

impl Request for RebuildDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Rename a droplet.
#[derive(Debug, Clone, Serialize)]
pub struct RenameDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
    /// New display name.
    pub name: String,
}

impl RenameDroplet {
    /// Rename the droplet.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: DropletActionType::Rename,
            name: name.into(),
        }
    }
}

impl Request for RenameDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Switch the managed kernel of a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChangeDropletKernel {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
    /// Target kernel id.
    pub kernel: u64,
}

impl ChangeDropletKernel {
    /// Switch the droplet to the given kernel id.
    #[must_use]
    pub const fn new(id: u64, kernel: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::ChangeKernel,
            kernel,
        }
    }
}

impl Request for ChangeDropletKernel {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Enable IPv6 networking on a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnableDropletIpv6 {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl EnableDropletIpv6 {
    /// Enable IPv6 for the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::EnableIpv6,
        }
    }
}

impl Request for EnableDropletIpv6 {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Enable private networking on a droplet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnableDropletPrivateNetworking {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
}

impl EnableDropletPrivateNetworking {
    /// Enable private networking for the droplet with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: DropletActionType::EnablePrivateNetworking,
        }
    }
}

impl Request for EnableDropletPrivateNetworking {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Take a named snapshot of a droplet.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDroplet {
    /// Droplet id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: DropletActionType,
    /// Name for the snapshot.
    pub name: String,
}

impl SnapshotDroplet {
    /// Snapshot the droplet under the given name.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: DropletActionType::Snapshot,
            name: name.into(),
        }
    }
}

impl Request for SnapshotDroplet {
    type Body = Self;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single droplet action.
#[derive(Debug, Clone, Copy)]
pub struct GetDropletAction {
    /// Droplet id.
    pub id: u64,
    /// Action id.
    pub action_id: u64,
}

impl Request for GetDropletAction {
    type Body = NoContent;
    type Response = DropletActionResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("droplets/{}/actions/{}", self.id, self.action_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_actions_post_only_the_type_tag() {
        let body = serde_json::to_value(RebootDroplet::new(3164450).body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"type": "reboot"}));

        let body =
            serde_json::to_value(EnableDropletIpv6::new(3164450).body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"type": "enable_ipv6"}));
    }

    #[test]
    fn parameterized_actions_carry_their_fields() {
        let resize = ResizeDroplet::new(3164450, "s-2vcpu-2gb", true);
        let body = serde_json::to_value(resize.body().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"type": "resize", "disk": true, "size": "s-2vcpu-2gb"})
        );

        let snapshot = SnapshotDroplet::new(3164450, "nightly");
        let body = serde_json::to_value(snapshot.body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"type": "snapshot", "name": "nightly"}));
    }

    #[test]
    fn actions_share_the_collection_path() {
        assert_eq!(RebootDroplet::new(42).path(), "droplets/42/actions");
        assert_eq!(
            GetDropletAction {
                id: 42,
                action_id: 7,
            }
            .path(),
            "droplets/42/actions/7"
        );
    }

    #[test]
    fn action_type_round_trips_through_its_wire_names() {
        for (value, wire) in [
            (DropletActionType::PowerCycle, "\"power_cycle\""),
            (DropletActionType::EnableIpv6, "\"enable_ipv6\""),
            (DropletActionType::PasswordReset, "\"password_reset\""),
        ] {
            assert_eq!(serde_json::to_string(&value).unwrap(), wire);
            assert_eq!(
                serde_json::from_str::<DropletActionType>(wire).unwrap(),
                value
            );
        }
    }
}
