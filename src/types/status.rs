//! Classification of Genderize response status codes.

/// Outcome class of an HTTP status returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// 200.
    Success,
    /// 400.
    BadRequest,
    /// 429.
    RateLimited,
    /// 500.
    InternalServerError,
    /// Any code the API does not document.
    Unclassified(u16),
}

impl ResponseStatus {
    /// Classifies a raw status code.
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => ResponseStatus::Success,
            400 => ResponseStatus::BadRequest,
            429 => ResponseStatus::RateLimited,
            500 => ResponseStatus::InternalServerError,
            other => ResponseStatus::Unclassified(other),
        }
    }

    /// Returns the failure reason for documented failure codes.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            ResponseStatus::BadRequest => Some("Bad request"),
            ResponseStatus::RateLimited => Some("Rate limit hit"),
            ResponseStatus::InternalServerError => Some("Internal Server Error"),
            ResponseStatus::Success | ResponseStatus::Unclassified(_) => None,
        }
    }

    /// Returns true for a successful response.
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::Success)
    }
}
