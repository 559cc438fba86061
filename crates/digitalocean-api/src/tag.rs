//! Tags and tag-to-resource assignment.

use crate::droplet::Droplet;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Usage counter for one kind of tagged resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TagStatistic<T> {
    /// Number of resources carrying the tag.
    pub count: u64,
    /// Most recently tagged resource, when any exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tagged: Option<T>,
}

/// Per-kind usage counters for a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedResources {
    /// Droplets carrying the tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplets: Option<TagStatistic<Droplet>>,
}

/// A tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// What currently carries the tag.
    pub resources: TaggedResources,
}

/// A resource named in a tag or untag request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource id, as a string.
    pub resource_id: String,
    /// Resource kind (e.g. `droplet`).
    pub resource_type: String,
}

/// Response wrapper for a single tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TagResponse {
    /// The tag.
    pub tag: Tag,
}

impl ApiResponse for TagResponse {}

/// Response wrapper for the tag collection.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    /// All tags on the account.
    pub tags: Vec<Tag>,
}

impl ApiResponse for TagsResponse {}

/// Create a tag.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTag {
    /// Tag name.
    pub name: String,
}

impl Request for CreateTag {
    type Body = Self;
    type Response = TagResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "tags".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single tag by name.
#[derive(Debug, Clone)]
pub struct GetTag {
    /// Tag name.
    pub name: String,
}

impl Request for GetTag {
    type Body = NoContent;
    type Response = TagResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("tags/{}", self.name)
    }
}

/// List all tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTags;

impl Request for ListTags {
    type Body = NoContent;
    type Response = TagsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "tags".to_string()
    }
}

/// Apply a tag to the named resources.
#[derive(Debug, Clone, Serialize)]
pub struct TagResources {
    /// Tag name.
    #[serde(skip)]
    pub name: String,
    /// Resources to tag.
    pub resources: Vec<ResourceIdentifier>,
}

impl Request for TagResources {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        format!("tags/{}/resources", self.name)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Remove a tag from the named resources.
#[derive(Debug, Clone, Serialize)]
pub struct UntagResources {
    /// Tag name.
    #[serde(skip)]
    pub name: String,
    /// Resources to untag.
    pub resources: Vec<ResourceIdentifier>,
}

impl Request for UntagResources {
    type Body = Self;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("tags/{}/resources", self.name)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}
