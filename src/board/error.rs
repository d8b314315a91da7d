use std::fmt;

use chrono::NaiveDate;

/// Storage failures reported by the repository traits.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Input rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("salary minimum {min} exceeds salary maximum {max}")]
    SalaryRange { min: u32, max: u32 },
    #[error("{field} end date {end} precedes start date {start}")]
    DateRange {
        field: &'static str,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("'{0}' is not an http(s) url")]
    InvalidUrl(String),
    #[error("invalid value '{value}' for search filter '{field}'")]
    InvalidFilter { field: &'static str, value: String },
}

/// Record kinds named in `NotFound` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Account,
    Posting,
    Application,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Resource::Account => "account",
            Resource::Posting => "job posting",
            Resource::Application => "application",
        };
        f.write_str(label)
    }
}

/// Outcome kinds of every board operation. None of them is fatal; the HTTP
/// layer renders each as a status code plus message.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("not permitted to {action}")]
    AuthorizationDenied { action: &'static str },
    #[error("an application for this job already exists")]
    DuplicateApplication,
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),
    #[error("'{0}' is not a valid application status")]
    InvalidStatusValue(String),
    #[error("{0} not found")]
    NotFound(Resource),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BoardError {
    pub(crate) fn denied(action: &'static str) -> Self {
        Self::AuthorizationDenied { action }
    }
}
