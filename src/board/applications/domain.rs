use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::accounts::UserId;
use crate::board::error::BoardError;
use crate::board::postings::PostingId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

/// Fixed, ordered status vocabulary of an application.
///
/// The order describes the usual progression; it is not enforced, and the
/// owning recruiter may move an application to any value at any time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Review,
    Interview,
    Offer,
    Closed,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Review,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Closed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Review => "review",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Closed => "closed",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Review => "Under Review",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Closed => "Closed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Closed)
    }

    /// Parse a vocabulary key, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, BoardError> {
        let key = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.label() == key)
            .ok_or_else(|| BoardError::InvalidStatusValue(raw.to_string()))
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seeker's application to one posting. At most one exists per
/// (job, applicant) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: PostingId,
    pub applicant: UserId,
    pub cover_note: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub status_updated_at: DateTime<Utc>,
}

impl Application {
    pub fn view(&self) -> ApplicationView {
        ApplicationView {
            application_id: self.id,
            job_id: self.job_id,
            applicant: self.applicant,
            cover_note: self.cover_note.clone(),
            status: self.status.label(),
            status_label: self.status.display_name(),
            applied_at: self.applied_at,
            status_updated_at: self.status_updated_at,
        }
    }
}

pub(crate) fn newest_first(left: &Application, right: &Application) -> Ordering {
    right
        .applied_at
        .cmp(&left.applied_at)
        .then_with(|| right.id.cmp(&left.id))
}

/// Application payload submitted by a job seeker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub cover_note: String,
}

/// Status change requested by a recruiter. Kept as a raw string so values
/// outside the vocabulary surface as `InvalidStatusValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub job_id: PostingId,
    pub applicant: UserId,
    pub cover_note: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub applied_at: DateTime<Utc>,
    pub status_updated_at: DateTime<Utc>,
}
