//! # digitalocean-api
//!
//! Typed resource declarations for the DigitalOcean v2 API.
//!
//! Each module carries the data shapes, response envelopes, and request
//! descriptors for one resource family. The descriptors are plain values;
//! hand them to [`DigitalOceanClient::send`] to perform the exchange:
//!
//! ```no_run
//! use digitalocean_api::account::GetAccount;
//! use digitalocean_api::DigitalOceanClient;
//!
//! # async fn example() -> digitalocean_api::Result<()> {
//! let client = DigitalOceanClient::new("my-api-token")?;
//! let response = client.send(&GetAccount).await?;
//! println!("droplet limit: {}", response.account.droplet_limit);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod account;
pub mod action;
pub mod certificate;
pub mod domain;
pub mod domain_record;
pub mod droplet;
pub mod droplet_action;
pub mod firewall;
pub mod floating_ip;
pub mod image;
pub mod image_action;
pub mod load_balancer;
pub mod region;
pub mod size;
pub mod snapshot;
pub mod ssh_key;
pub mod tag;
pub mod volume;
pub mod volume_action;

// Re-export the engine surface so callers need only this crate.
pub use digitalocean_core::{
    ApiResponse, DigitalOceanClient, DigitalOceanClientBuilder, Error, Method, NoContent,
    PagedRequest, RemoteError, Request, Result,
};
