//! SSH keys registered with the account.

use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered public key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    /// Key id.
    pub id: u64,
    /// Key fingerprint.
    pub fingerprint: String,
    /// Full public key in OpenSSH format.
    pub public_key: String,
    /// Display name.
    pub name: String,
}

/// Keys can be addressed by numeric id or by fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SshKeyIdentifier {
    /// Numeric key id.
    Id(u64),
    /// Key fingerprint.
    Fingerprint(String),
}

impl fmt::Display for SshKeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Fingerprint(fingerprint) => f.write_str(fingerprint),
        }
    }
}

/// Response wrapper for a single key.
#[derive(Debug, Clone, Deserialize)]
pub struct SshKeyResponse {
    /// The key.
    pub ssh_key: SshKey,
}

impl ApiResponse for SshKeyResponse {}

/// Response wrapper for the key collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SshKeysResponse {
    /// Registered keys.
    pub ssh_keys: Vec<SshKey>,
}

impl ApiResponse for SshKeysResponse {}

/// Register a public key.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSshKey {
    /// Display name.
    pub name: String,
    /// Public key in OpenSSH format.
    pub public_key: String,
}

impl Request for CreateSshKey {
    type Body = Self;
    type Response = SshKeyResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "account/keys".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single key.
#[derive(Debug, Clone)]
pub struct GetSshKey {
    /// Key id or fingerprint.
    pub identifier: SshKeyIdentifier,
}

impl Request for GetSshKey {
    type Body = NoContent;
    type Response = SshKeyResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("account/keys/{}", self.identifier)
    }
}

/// List all registered keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSshKeys;

impl Request for ListSshKeys {
    type Body = NoContent;
    type Response = SshKeysResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "account/keys".to_string()
    }
}

/// Rename a key.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSshKey {
    /// Key id or fingerprint.
    #[serde(skip)]
    pub identifier: SshKeyIdentifier,
    /// New display name.
    pub name: String,
}

impl Request for UpdateSshKey {
    type Body = Self;
    type Response = SshKeyResponse;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("account/keys/{}", self.identifier)
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Remove a key from the account.
#[derive(Debug, Clone)]
pub struct DeleteSshKey {
    /// Key id or fingerprint.
    pub identifier: SshKeyIdentifier,
}

impl Request for DeleteSshKey {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("account/keys/{}", self.identifier)
    }
}
