//! Account-wide action history.
//!
//! Actions record every operation the API has performed against a resource;
//! the typed per-resource variants live in [`crate::droplet_action`],
//! [`crate::image_action`], and [`crate::volume_action`].

use crate::region::Region;
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Progress of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// Still running.
    #[serde(rename = "in-progress")]
    InProgress,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Errored,
}

/// A recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action id.
    pub id: u64,
    /// Progress of the action.
    pub status: ActionStatus,
    /// Kind of operation performed (free-form on this endpoint).
    #[serde(rename = "type")]
    pub kind: String,
    /// When the action started.
    #[serde(with = "timestamp")]
    pub started_at: DateTime<Utc>,
    /// When the action finished.
    #[serde(with = "timestamp")]
    pub completed_at: DateTime<Utc>,
    /// Id of the resource the action ran against.
    pub resource_id: u64,
    /// Kind of resource the action ran against.
    pub resource_type: String,
    /// Region the action ran in.
    pub region: Region,
    /// Region slug, when reported separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_slug: Option<String>,
}

/// Response wrapper for the action collection.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsResponse {
    /// Recorded actions.
    pub actions: Vec<Action>,
}

impl ApiResponse for ActionsResponse {}

/// Response wrapper for a single action.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    /// The action.
    pub action: Action,
}

impl ApiResponse for ActionResponse {}

/// List every action taken on the account.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListActions;

impl Request for ListActions {
    type Body = NoContent;
    type Response = ActionsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "actions".to_string()
    }
}

/// Fetch a single action by id.
#[derive(Debug, Clone, Copy)]
pub struct GetAction {
    /// Action id.
    pub id: u64,
}

impl Request for GetAction {
    type Body = NoContent;
    type Response = ActionResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("actions/{}", self.id)
    }
}
