use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::board::error::BoardError;
use crate::board::skills::SkillId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Role selector used at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    JobSeeker,
    Recruiter,
}

impl RoleKind {
    pub const fn label(self) -> &'static str {
        match self {
            RoleKind::JobSeeker => "job_seeker",
            RoleKind::Recruiter => "recruiter",
        }
    }
}

/// A registered user together with the profile data of their role.
///
/// Every board operation takes the acting `Account` explicitly; there is no
/// ambient session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn kind(&self) -> RoleKind {
        match self.role {
            Role::JobSeeker(_) => RoleKind::JobSeeker,
            Role::Recruiter(_) => RoleKind::Recruiter,
        }
    }

    pub fn require_job_seeker(&self, action: &'static str) -> Result<(), BoardError> {
        match self.role {
            Role::JobSeeker(_) => Ok(()),
            Role::Recruiter(_) => Err(BoardError::denied(action)),
        }
    }

    pub fn require_recruiter(&self, action: &'static str) -> Result<(), BoardError> {
        match self.role {
            Role::Recruiter(_) => Ok(()),
            Role::JobSeeker(_) => Err(BoardError::denied(action)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    JobSeeker(JobSeekerProfile),
    Recruiter(RecruiterProfile),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSeekerProfile {
    pub headline: Option<String>,
    pub email: Option<String>,
    pub skills: BTreeSet<SkillId>,
    /// Newest start date first.
    pub education: Vec<Education>,
    /// Newest start date first.
    pub experience: Vec<WorkExperience>,
    pub links: Vec<ProfileLink>,
}

impl JobSeekerProfile {
    pub(crate) fn push_education(&mut self, entry: Education) {
        self.education.push(entry);
        self.education
            .sort_by(|left, right| right.start_date.cmp(&left.start_date));
    }

    pub(crate) fn push_experience(&mut self, entry: WorkExperience) {
        self.experience.push(entry);
        self.experience
            .sort_by(|left, right| right.start_date.cmp(&left.start_date));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterProfile {
    pub display_name: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

/// External profile link such as a portfolio or LinkedIn page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub name: String,
    pub url: String,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub role: RoleKind,
    /// Recruiter display name; defaults to the username.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Profile edit payload. Seekers use `headline`, `email` and `skills`;
/// recruiters use `display_name` and `company`. Fields for the other role
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Account rendered with skill names instead of ids.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: UserId,
    pub username: String,
    pub role: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profile: ProfileView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProfileView {
    JobSeeker {
        headline: Option<String>,
        email: Option<String>,
        skills: Vec<String>,
        education: Vec<Education>,
        experience: Vec<WorkExperience>,
        links: Vec<ProfileLink>,
    },
    Recruiter {
        display_name: String,
        company: Option<String>,
    },
}
