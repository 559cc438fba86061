//! Datacenter regions.

use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// A datacenter region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Short region identifier (e.g. `nyc3`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Size slugs available in the region.
    pub sizes: Vec<String>,
    /// Whether new resources can be created here.
    pub available: bool,
    /// Feature flags enabled for the region.
    pub features: Vec<String>,
}

/// Response wrapper for the region collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsResponse {
    /// All known regions.
    pub regions: Vec<Region>,
}

impl ApiResponse for RegionsResponse {}

/// List all regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRegions;

impl Request for ListRegions {
    type Body = NoContent;
    type Response = RegionsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "regions".to_string()
    }
}
