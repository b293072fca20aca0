//! Error type shared by every hunter.io operation.

use reqwest::StatusCode;

/// Errors returned by the hunter.io client.
///
/// The first nine variants correspond one-to-one to the status codes the API
/// documents; see [`Error::from_status`]. The remaining variants cover the
/// transport, response decoding and client construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 204: the request succeeded but no content was sent back.
    #[error("the request was successful and no additional content was sent")]
    NoContent,

    /// 400: the request was not valid.
    #[error("your request was not valid")]
    BadRequest,

    /// 401: no valid API key was provided.
    #[error("no valid API key was provided")]
    Unauthorized,

    /// 403: the global rate limit was reached.
    #[error("you have reached the global rate limit")]
    Forbidden,

    /// 404: the requested resource does not exist.
    #[error("the requested resource does not exist")]
    NotFound,

    /// 422: the request was valid but creating the resource failed.
    #[error("your request is valid but the creation of the resource failed")]
    UnprocessableEntity,

    /// 429: the account usage limit was reached.
    #[error("you have reached your usage limit, upgrade your plan if necessary")]
    TooManyRequests,

    /// 451: processing of the resource was withdrawn at the person's request.
    #[error(
        "the person behind the requested resource asked to stop the processing of this resource"
    )]
    UnavailableForLegalReasons,

    /// Any other status, carrying the code that was received.
    #[error("something went wrong on hunter's end (status {0})")]
    ServerError(u16),

    /// Network, TLS or timeout failure while talking to the API.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The caller cancelled the request before it completed.
    #[error("request was cancelled")]
    Cancelled,

    /// The success body was not the JSON shape the endpoint declares.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// No API key was given and `HUNTER_API_KEY` is unset or empty.
    #[error("no API key provided and HUNTER_API_KEY is not set")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A query was built with a missing or malformed parameter.
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
}

impl Error {
    /// Map a response status to its error, or `None` for a success status.
    ///
    /// Only 200 and 201 count as success; every other code has an error.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        let error = match status.as_u16() {
            200 | 201 => return None,
            204 => Self::NoContent,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::UnprocessableEntity,
            429 => Self::TooManyRequests,
            451 => Self::UnavailableForLegalReasons,
            other => Self::ServerError(other),
        };
        Some(error)
    }

    /// The HTTP status behind this error, when there is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NoContent => Some(StatusCode::NO_CONTENT),
            Self::BadRequest => Some(StatusCode::BAD_REQUEST),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden => Some(StatusCode::FORBIDDEN),
            Self::NotFound => Some(StatusCode::NOT_FOUND),
            Self::UnprocessableEntity => Some(StatusCode::UNPROCESSABLE_ENTITY),
            Self::TooManyRequests => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::UnavailableForLegalReasons => Some(StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS),
            Self::ServerError(code) => StatusCode::from_u16(*code).ok(),
            Self::Request(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the request never produced a response: network failure,
    /// timeout or cancellation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_have_no_error() {
        assert!(Error::from_status(StatusCode::OK).is_none());
        assert!(Error::from_status(StatusCode::CREATED).is_none());
    }

    #[test]
    fn documented_statuses_map_to_their_variant() {
        let cases = [
            (204, "NoContent"),
            (400, "BadRequest"),
            (401, "Unauthorized"),
            (403, "Forbidden"),
            (404, "NotFound"),
            (422, "UnprocessableEntity"),
            (429, "TooManyRequests"),
            (451, "UnavailableForLegalReasons"),
        ];
        for (code, name) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let err = Error::from_status(status).unwrap();
            assert_eq!(format!("{err:?}"), name, "status {code}");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn unknown_statuses_are_server_errors() {
        for code in [202, 301, 418, 500, 502, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            match Error::from_status(status) {
                Some(Error::ServerError(got)) => assert_eq!(got, code),
                other => panic!("status {code} mapped to {other:?}"),
            }
        }
    }

    #[test]
    fn transport_classification() {
        assert!(Error::Cancelled.is_transport());
        assert!(!Error::Unauthorized.is_transport());
        assert!(!Error::MissingApiKey.is_transport());
    }
}
