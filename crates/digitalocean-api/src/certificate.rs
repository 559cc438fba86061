//! TLS certificates for load balancers.

use chrono::{DateTime, Utc};
use digitalocean_core::codec::timestamp;
use digitalocean_core::{ApiResponse, Method, NoContent, Request};
use serde::{Deserialize, Serialize};

/// Verification state of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateState {
    /// Awaiting verification.
    Pending,
    /// Verified and usable.
    Verified,
    /// Verification failed.
    Error,
}

/// How the certificate material is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateType {
    /// User-supplied key and chain.
    Custom,
    /// Automatically issued and renewed by Let's Encrypt.
    LetsEncrypt,
}

/// A stored certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Certificate id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Expiry of the leaf certificate.
    #[serde(with = "timestamp")]
    pub not_after: DateTime<Utc>,
    /// SHA-1 fingerprint of the leaf certificate.
    pub sha1_fingerprint: String,
    /// When the certificate was stored.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Domain names the certificate covers.
    pub dns_names: Vec<String>,
    /// Verification state.
    pub state: CertificateState,
    /// How the material is managed.
    #[serde(rename = "type")]
    pub kind: CertificateType,
}

/// Response wrapper for a single certificate.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateResponse {
    /// The certificate.
    pub certificate: Certificate,
}

impl ApiResponse for CertificateResponse {}

/// Response wrapper for the certificate collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificatesResponse {
    /// Stored certificates.
    pub certificates: Vec<Certificate>,
}

impl ApiResponse for CertificatesResponse {}

/// Store a certificate, either custom material or a Let's Encrypt order.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCertificate {
    /// Display name.
    pub name: String,
    /// How the material is managed.
    #[serde(rename = "type")]
    pub kind: CertificateType,
    /// PEM private key. Required for custom certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// PEM leaf certificate. Required for custom certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_certificate: Option<String>,
    /// PEM chain. Optional for custom certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_chain: Option<String>,
    /// Names to order for. Required for Let's Encrypt certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_names: Option<Vec<String>>,
}

impl CreateCertificate {
    /// Order a Let's Encrypt certificate covering the given names.
    #[must_use]
    pub fn lets_encrypt(name: impl Into<String>, dns_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: CertificateType::LetsEncrypt,
            private_key: None,
            leaf_certificate: None,
            certificate_chain: None,
            dns_names: Some(dns_names),
        }
    }

    /// Store user-supplied certificate material.
    #[must_use]
    pub fn custom(
        name: impl Into<String>,
        private_key: impl Into<String>,
        leaf_certificate: impl Into<String>,
        certificate_chain: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: CertificateType::Custom,
            private_key: Some(private_key.into()),
            leaf_certificate: Some(leaf_certificate.into()),
            certificate_chain,
            dns_names: None,
        }
    }
}

impl Request for CreateCertificate {
    type Body = Self;
    type Response = CertificateResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "certificates".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Fetch a single certificate by id.
#[derive(Debug, Clone, Copy)]
pub struct GetCertificate {
    /// Certificate id.
    pub id: u64,
}

impl Request for GetCertificate {
    type Body = NoContent;
    type Response = CertificateResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("certificates/{}", self.id)
    }
}

/// List all certificates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCertificates;

impl Request for ListCertificates {
    type Body = NoContent;
    type Response = CertificatesResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "certificates".to_string()
    }
}

/// Delete a certificate.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCertificate {
    /// Certificate id.
    pub id: u64,
}

impl Request for DeleteCertificate {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("certificates/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lets_encrypt_body_names_the_domains() {
        let request = CreateCertificate::lets_encrypt(
            "web-cert",
            vec!["example.com".to_string(), "www.example.com".to_string()],
        );
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(body["type"], "lets_encrypt");
        assert_eq!(
            body["dns_names"],
            serde_json::json!(["example.com", "www.example.com"])
        );
        assert!(body.get("private_key").is_none());
    }

    #[test]
    fn custom_body_carries_the_material() {
        let request = CreateCertificate::custom("web-cert", "KEY", "LEAF", None);
        let body = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(body["type"], "custom");
        assert_eq!(body["private_key"], "KEY");
        assert!(body.get("certificate_chain").is_none());
        assert!(body.get("dns_names").is_none());
    }
}
