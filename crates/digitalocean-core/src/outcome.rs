//! Status-code outcome classification.
//!
//! Before any type-specific decoding happens, a response is sorted into one
//! of four outcomes: success, structured remote error, unstructured remote
//! error, or unacceptable status. The 4xx range gets a second chance to
//! surface the API's `{id, message}` envelope; every other non-2xx status
//! is reported as a bare code, since the API promises no structured body
//! for those.

use crate::error::{Error, RemoteError, Result};
use reqwest::StatusCode;
use std::ops::Range;

/// Statuses treated as success.
pub const SUCCESS_RANGE: Range<u16> = 200..300;

/// Statuses re-read as a structured remote error when the body allows it.
pub const REMOTE_ERROR_RANGE: Range<u16> = 400..500;

/// Decide the outcome category for a status code and optional payload.
///
/// `Ok(())` means the status is acceptable and decoding may proceed.
///
/// # Errors
///
/// - [`Error::Remote`] for a 4xx whose body parses as the error envelope,
///   with `status` overwritten from the transport code;
/// - [`Error::UnclassifiedRemote`] for any other 4xx;
/// - [`Error::UnacceptableStatus`] for every status outside both ranges.
pub fn classify(status: StatusCode, body: Option<&[u8]>) -> Result<()> {
    let code = status.as_u16();

    if REMOTE_ERROR_RANGE.contains(&code) {
        if let Some(bytes) = body {
            if let Ok(mut remote) = serde_json::from_slice::<RemoteError>(bytes) {
                remote.status = Some(code);
                return Err(Error::Remote(remote));
            }
        }
        return Err(Error::UnclassifiedRemote(code));
    }

    if !SUCCESS_RANGE.contains(&code) {
        return Err(Error::UnacceptableStatus(code));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &[u8] = br#"{"id":"not_found","message":"nope"}"#;

    #[test]
    fn success_range_passes_through() {
        for code in [200, 201, 202, 204, 299] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(classify(status, None).is_ok());
            assert!(classify(status, Some(b"garbage".as_slice())).is_ok());
        }
    }

    #[test]
    fn parseable_4xx_becomes_remote_error_with_transport_status() {
        let err = classify(StatusCode::NOT_FOUND, Some(ENVELOPE)).unwrap_err();
        match err {
            Error::Remote(remote) => {
                assert_eq!(remote.id, "not_found");
                assert_eq!(remote.message, "nope");
                assert_eq!(remote.status, Some(404));
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn wire_status_is_overwritten_not_trusted() {
        let body = br#"{"id":"teapot","message":"short and stout","status":200}"#;
        let err = classify(StatusCode::IM_A_TEAPOT, Some(body.as_slice())).unwrap_err();
        match err {
            Error::Remote(remote) => assert_eq!(remote.status, Some(418)),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_4xx_is_unclassified() {
        for body in [None, Some(b"".as_slice()), Some(b"<html>".as_slice())] {
            let err = classify(StatusCode::UNPROCESSABLE_ENTITY, body).unwrap_err();
            assert!(matches!(err, Error::UnclassifiedRemote(422)));
        }
    }

    #[test]
    fn statuses_outside_both_ranges_are_unacceptable() {
        for code in [101, 304, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            // An error envelope in the body changes nothing outside 4xx.
            let err = classify(status, Some(ENVELOPE)).unwrap_err();
            assert!(matches!(err, Error::UnacceptableStatus(c) if c == code));
        }
    }
}
