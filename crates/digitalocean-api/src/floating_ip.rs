//! Floating IPs.

use crate::droplet::Droplet;
use crate::region::Region;
use serde::{Deserialize, Serialize};

/// A reserved address that can move between droplets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    /// The reserved address.
    pub ip: String,
    /// Region the address is reserved in.
    pub region: Region,
    /// Droplet the address currently points at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplet: Option<Droplet>,
}
