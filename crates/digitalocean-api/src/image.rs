//! Images: snapshots, backups, and base distributions.

use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::query::QueryParams;
use digitalocean_core::{ApiResponse, Method, NoContent, PagedRequest, Request};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Origin of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// User-taken snapshot.
    Snapshot,
    /// Automatic backup.
    Backup,
    /// Distribution base image.
    Base,
}

/// A disk image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Origin of the image.
    #[serde(rename = "type")]
    pub kind: ImageType,
    /// Distribution name (e.g. `Ubuntu`).
    pub distribution: String,
    /// Slug for public base images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Whether the image is public.
    pub public: bool,
    /// Regions the image is available in.
    pub regions: Vec<String>,
    /// Minimum disk in GiB needed to use the image.
    pub min_disk_size: u32,
    /// Image size in GiB. Documented as an integer, returned fractional.
    pub size_gigabytes: f64,
    /// When the image was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Response wrapper for the image collection.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    /// Matching images.
    pub images: Vec<Image>,
}

impl ApiResponse for ImagesResponse {}

/// Response wrapper for a single image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    /// The image.
    pub image: Image,
}

impl ApiResponse for ImageResponse {}

/// Category filter for [`ListImages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageListFilter {
    /// Distribution base images only.
    Distribution,
    /// One-click application images only.
    Application,
}

impl ImageListFilter {
    /// Wire value used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::Application => "application",
        }
    }
}

/// List images, optionally filtered by category or visibility.
#[derive(Debug, Clone, Copy)]
pub struct ListImages {
    /// Restrict results to one category.
    pub kind: Option<ImageListFilter>,
    /// Restrict results to the account's private images.
    pub private: Option<bool>,
    /// Page index to fetch.
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl Default for ListImages {
    fn default() -> Self {
        Self {
            kind: None,
            private: None,
            page: 0,
            per_page: 200,
        }
    }
}

impl Request for ListImages {
    type Body = NoContent;
    type Response = ImagesResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "images".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("per_page", self.per_page);
        params.push_opt("type", self.kind.map(ImageListFilter::as_str));
        params.push_opt("private", self.private);
        params.into_query()
    }
}

impl PagedRequest for ListImages {
    fn page(&self) -> u32 {
        self.page
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// Fetch a single image by id.
#[derive(Debug, Clone, Copy)]
pub struct GetImage {
    /// Image id.
    pub id: u64,
}

impl Request for GetImage {
    type Body = NoContent;
    type Response = ImageResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("images/{}", self.id)
    }
}

/// Fetch a public image by slug.
#[derive(Debug, Clone)]
pub struct GetImageBySlug {
    /// Image slug (e.g. `ubuntu-24-04-x64`).
    pub slug: String,
}

impl Request for GetImageBySlug {
    type Body = NoContent;
    type Response = ImageResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("images/{}", self.slug)
    }
}

/// Rename an image.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateImage {
    /// Image id.
    #[serde(skip)]
    pub id: u64,
    /// New display name.
    pub name: String,
}

impl Request for UpdateImage {
    type Body = Self;
    type Response = ImageResponse;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("images/{}", self.id)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Delete an image.
#[derive(Debug, Clone, Copy)]
pub struct DeleteImage {
    /// Image id.
    pub id: u64,
}

impl Request for DeleteImage {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("images/{}", self.id)
    }
}
