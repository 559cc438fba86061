//! Image actions: region transfers and format conversions.

use crate::action::ActionStatus;
use crate::region::Region;
use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Kind of image action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageActionType {
    /// Copy the image to another region.
    Transfer,
    /// Convert a backup into a snapshot.
    Convert,
}

/// A recorded image action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAction {
    /// Action id.
    pub id: u64,
    /// Progress of the action.
    pub status: ActionStatus,
    /// Kind of action.
    #[serde(rename = "type")]
    pub kind: ImageActionType,
    /// When the action started.
    #[serde(with = "timestamp")]
    pub started_at: DateTime<Utc>,
    /// When the action finished.
    #[serde(with = "timestamp")]
    pub completed_at: DateTime<Utc>,
    /// Id of the image acted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    /// Kind of resource acted on (always `image` here).
    pub resource_type: String,
    /// Region the action ran in.
    pub region: Region,
    /// Region slug, when reported separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_slug: Option<String>,
}

/// Response wrapper for a single image action.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageActionResponse {
    /// The recorded action.
    pub action: ImageAction,
}

impl ApiResponse for ImageActionResponse {}

/// Response wrapper for an image's action history.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageActionsResponse {
    /// Recorded actions.
    pub actions: Vec<ImageAction>,
}

impl ApiResponse for ImageActionsResponse {}

/// Transfer an image to another region.
#[derive(Debug, Clone, Serialize)]
pub struct TransferImage {
    /// Image id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: ImageActionType,
    /// Destination region slug.
    pub region: String,
}

impl TransferImage {
    /// Transfer the image to the given region.
    #[must_use]
    pub fn new(id: u64, region: impl Into<String>) -> Self {
        Self {
            id,
            kind: ImageActionType::Transfer,
            region: region.into(),
        }
    }
}

impl Request for TransferImage {
    type Body = Self;
    type Response = ImageActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("images/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Convert a backup image into a snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConvertImage {
    /// Image id.
    #[serde(skip)]
    pub id: u64,
    #[serde(rename = "type")]
    kind: ImageActionType,
}

impl ConvertImage {
    /// Convert the image with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            kind: ImageActionType::Convert,
        }
    }
}

impl Request for ConvertImage {
    type Body = Self;
    type Response = ImageActionResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("images/{}/actions", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// List actions performed on an image.
#[derive(Debug, Clone, Copy)]
pub struct ListImageActions {
    /// Image id.
    pub id: u64,
}

impl Request for ListImageActions {
    type Body = NoContent;
    type Response = ImageActionsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("images/{}/actions", self.id)
    }
}

/// Fetch a single image action.
#[derive(Debug, Clone, Copy)]
pub struct GetImageAction {
    /// Image id.
    pub id: u64,
    /// Action id.
    pub action_id: u64,
}

impl Request for GetImageAction {
    type Body = NoContent;
    type Response = ImageActionResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("images/{}/actions/{}", self.id, self.action_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_body_names_the_region() {
        let body = serde_json::to_value(TransferImage::new(7938269, "nyc2").body().unwrap())
            .unwrap();
        assert_eq!(body, serde_json::json!({"type": "transfer", "region": "nyc2"}));
    }

    #[test]
    fn convert_body_carries_the_convert_tag() {
        let body = serde_json::to_value(ConvertImage::new(7938291).body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"type": "convert"}));
    }
}
