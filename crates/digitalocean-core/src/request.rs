//! The request-descriptor and response contracts consumed by the dispatcher.
//!
//! A request is a plain value describing one API call; the dispatcher reads
//! it through [`Request`] and never learns which resource it belongs to.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use reqwest::Method;

/// Declarative description of a single API call.
///
/// A concrete request carries everything one exchange needs — method, path
/// relative to the API base, optional query parameters, an optional JSON
/// body — and statically ties itself to the response shape the server is
/// expected to return.
pub trait Request {
    /// Shape of the JSON request payload.
    type Body: Serialize;
    /// Shape the server is expected to return.
    type Response: ApiResponse;

    /// HTTP method for the call (GET, POST, PUT, or DELETE).
    fn method(&self) -> Method;

    /// Path relative to the API base.
    ///
    /// Must not repeat the base URL and must not start with a slash.
    fn path(&self) -> String;

    /// Query parameters; keys are unique.
    fn query(&self) -> Option<BTreeMap<String, String>> {
        None
    }

    /// Request payload, when the call sends one.
    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

/// A request over a paginated collection.
///
/// Implementations fold [`page`](PagedRequest::page) and
/// [`per_page`](PagedRequest::per_page) into their own [`Request::query`];
/// the dispatcher does not treat paginated calls specially.
pub trait PagedRequest: Request {
    /// Page index to fetch.
    fn page(&self) -> u32;

    /// Number of items per page.
    fn per_page(&self) -> u32;
}

/// Contract for response shapes.
///
/// [`no_content`](ApiResponse::no_content) is the explicit tag for the one
/// type whose wire body is never inspected; for every other shape it stays
/// `None` and the payload is decoded normally.
pub trait ApiResponse: DeserializeOwned {
    /// The value delivered without touching the wire body, when this type
    /// is the no-content marker.
    fn no_content() -> Option<Self> {
        None
    }
}

/// Unit marker for "no request payload" and "no meaningful response body".
///
/// As a `Body` it is never sent (the default [`Request::body`] stays
/// `None`); as a `Response` it makes success a function of the status code
/// alone, whatever bytes the server actually returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoContent;

impl ApiResponse for NoContent {
    fn no_content() -> Option<Self> {
        Some(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Plain {
        #[allow(dead_code)]
        value: u32,
    }

    impl ApiResponse for Plain {}

    #[test]
    fn no_content_is_the_only_tagged_type() {
        assert_eq!(NoContent::no_content(), Some(NoContent));
        assert!(Plain::no_content().is_none());
    }

    #[test]
    fn descriptor_defaults_are_empty() {
        struct Ping;
        impl Request for Ping {
            type Body = NoContent;
            type Response = NoContent;

            fn method(&self) -> Method {
                Method::GET
            }

            fn path(&self) -> String {
                "ping".to_string()
            }
        }

        let ping = Ping;
        assert!(ping.query().is_none());
        assert!(ping.body().is_none());
    }
}
