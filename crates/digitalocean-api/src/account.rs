//! The authenticated account.

use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Standing of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account in good standing.
    Active,
    /// Account flagged for attention.
    Warning,
    /// Account locked out of the API.
    Locked,
}

/// Account details as returned by `GET account`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Maximum number of droplets the account may create.
    pub droplet_limit: u32,
    /// Maximum number of floating IPs the account may hold.
    pub floating_ip_limit: u32,
    /// Email address on file.
    pub email: String,
    /// Opaque unique identifier for the account.
    pub uuid: String,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Current standing.
    pub status: AccountStatus,
    /// Free-form note accompanying the status.
    pub status_message: String,
}

/// Response wrapper for a single account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    /// The account.
    pub account: Account,
}

impl ApiResponse for AccountResponse {}

/// Fetch the authenticated account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAccount;

impl Request for GetAccount {
    type Body = NoContent;
    type Response = AccountResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "account".to_string()
    }
}
