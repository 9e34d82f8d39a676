//! Response classification and decoding.

use hyper::ext::ReasonPhrase;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::clients::errors::StormError;

/// Reason attached to [`StormError::RecordNotFound`].
pub const NO_DATA_REASON: &str = "No data";

/// Returns the reason phrase the server sent on the status line.
///
/// hyper only keeps the phrase when it differs from the canonical one for the
/// code, so the canonical phrase (or an empty string for unknown codes) is
/// used otherwise.
#[must_use]
pub fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .map_or_else(
            || {
                response
                    .status()
                    .canonical_reason()
                    .unwrap_or_default()
                    .to_string()
            },
            |phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        )
}

/// Maps a status code, reason phrase and body to the error the caller should
/// see, if any.
///
/// A blank body on a success status is treated as a missing record, as is a
/// blank 404. Every other 4xx is a bad request, 5xx a server error, and any
/// remaining non-success status a generic request error. Those three carry
/// `reason` unchanged.
///
/// # Errors
///
/// Returns the [`StormError`] variant matching the response.
pub fn check_response(status: StatusCode, reason: &str, body: &str) -> Result<(), StormError> {
    let blank = body.trim().is_empty();
    if blank && (status.is_success() || status == StatusCode::NOT_FOUND) {
        return Err(StormError::RecordNotFound {
            status: StatusCode::NOT_FOUND.as_u16(),
            reason: NO_DATA_REASON.to_string(),
        });
    }

    if status.is_success() {
        return Ok(());
    }

    let code = status.as_u16();
    let reason = reason.to_string();
    Err(match code {
        400..=499 => StormError::BadRequest {
            status: code,
            reason,
        },
        500..=599 => StormError::ServerError {
            status: code,
            reason,
        },
        _ => StormError::Request {
            status: code,
            reason,
        },
    })
}

/// Decodes a JSON response body into `T`.
///
/// # Errors
///
/// Returns [`StormError::Deserialize`] if the body does not match `T`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, StormError> {
    serde_json::from_str(body).map_err(StormError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    fn check(code: u16, body: &str) -> Result<(), StormError> {
        let status = status(code);
        check_response(status, status.canonical_reason().unwrap_or_default(), body)
    }

    #[test]
    fn test_success_with_body_passes() {
        assert!(check(200, r#"{"a":1}"#).is_ok());
        assert!(check(201, "[]").is_ok());
    }

    #[test]
    fn test_blank_success_body_is_record_not_found() {
        for body in ["", "   ", "\n\t"] {
            match check(200, body) {
                Err(StormError::RecordNotFound { status, reason }) => {
                    assert_eq!(status, 404);
                    assert_eq!(reason, NO_DATA_REASON);
                }
                other => panic!("Expected RecordNotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_404_is_record_not_found() {
        let result = check(404, "");
        assert!(matches!(
            result,
            Err(StormError::RecordNotFound { status: 404, .. })
        ));
    }

    #[test]
    fn test_404_with_body_is_bad_request() {
        let result = check(404, r#"{"Message":"Unknown route"}"#);
        assert!(matches!(result, Err(StormError::BadRequest { status: 404, .. })));
    }

    #[test]
    fn test_4xx_is_bad_request_with_reason() {
        match check(400, "invalid") {
            Err(StormError::BadRequest { status, reason }) => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Bad Request");
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }

        assert!(matches!(
            check(499, ""),
            Err(StormError::BadRequest { status: 499, .. })
        ));
    }

    #[test]
    fn test_5xx_is_server_error() {
        for code in [500, 503, 599] {
            let result = check(code, "");
            assert!(
                matches!(result, Err(StormError::ServerError { status, .. }) if status == code),
                "{code}"
            );
        }
    }

    #[test]
    fn test_other_non_success_is_generic_request_error() {
        match check(304, "") {
            Err(StormError::Request { status, reason }) => {
                assert_eq!(status, 304);
                assert_eq!(reason, "Not Modified");
            }
            other => panic!("Expected Request, got {other:?}"),
        }
    }

    #[test]
    fn test_server_reason_phrase_is_kept() {
        match check_response(status(400), "Basket Is Locked", "") {
            Err(StormError::BadRequest { status, reason }) => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Basket Is Locked");
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }

        match check_response(status(460), "Checkout Expired", "") {
            Err(StormError::BadRequest { status, reason }) => {
                assert_eq!(status, 460);
                assert_eq!(reason, "Checkout Expired");
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_404_ignores_server_reason() {
        match check_response(status(404), "Nothing Here", " ") {
            Err(StormError::RecordNotFound { reason, .. }) => assert_eq!(reason, NO_DATA_REASON),
            other => panic!("Expected RecordNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_body_reports_mismatch() {
        let result: Result<Vec<u32>, _> = decode_body(r#"{"not":"a list"}"#);
        assert!(matches!(result, Err(StormError::Deserialize(_))));

        let values: Vec<u32> = decode_body("[1,2,3]").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
