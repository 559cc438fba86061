//! Droplet sizes.

use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// A droplet size offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Size identifier (e.g. `s-1vcpu-1gb`).
    pub slug: String,
    /// Whether droplets of this size can currently be created.
    pub available: bool,
    /// Memory in MiB.
    pub memory: u32,
    /// Number of virtual CPUs.
    pub vcpus: u32,
    /// Disk in GiB.
    pub disk: u32,
    /// Transfer bandwidth in TiB. Documented as an integer, returned
    /// fractional.
    pub transfer: f64,
    /// Regions offering this size.
    pub regions: Vec<String>,
    /// Monthly price in USD. Documented as an integer, returned fractional.
    pub price_monthly: f64,
    /// Hourly price in USD.
    pub price_hourly: f64,
}

/// Response wrapper for the size collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SizesResponse {
    /// All size offerings.
    pub sizes: Vec<Size>,
}

impl ApiResponse for SizesResponse {}

/// List all sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSizes;

impl Request for ListSizes {
    type Body = NoContent;
    type Response = SizesResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "sizes".to_string()
    }
}
