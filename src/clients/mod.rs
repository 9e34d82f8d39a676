//! HTTP client types for Storm commerce API communication.
//!
//! # Overview
//!
//! - [`StormClient`]: The authenticated async client (`get`, `post`, `post_json`)
//! - [`StormError`]: Classified request failures
//! - [`prepare_url`]: Base URL and `format=json` normalization
//! - [`HttpMethod`]: Methods used against the API
//! - [`reason_phrase`]: The reason phrase the server sent with the status
//!
//! # Request pipeline
//!
//! Each call runs the same linear steps: obtain a bearer token (cached or
//! freshly exchanged), send the request with `Authorization` and
//! `applicationId` headers, classify the status, and decode the JSON body.
//!
//! | Response                          | Result                          |
//! |-----------------------------------|---------------------------------|
//! | 2xx with body                     | `Ok(T)`                         |
//! | 2xx with blank body, blank 404    | [`StormError::RecordNotFound`]  |
//! | 4xx                               | [`StormError::BadRequest`]      |
//! | 5xx                               | [`StormError::ServerError`]     |
//! | anything else                     | [`StormError::Request`]         |
//!
//! There is no retry logic.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::StormError;
pub use http_client::{StormClient, APPLICATION_ID_HEADER, SDK_VERSION};
pub use http_request::{prepare_url, to_json_body, HttpMethod, FORMAT_JSON_PARAM};
pub use http_response::{check_response, decode_body, reason_phrase, NO_DATA_REASON};
