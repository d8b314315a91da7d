use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::accounts::UserId;
use crate::board::error::ValidationError;
use crate::board::input::required;
use crate::board::skills::SkillId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingId(pub u64);

/// Lower-case key with `-` folded to `_`, so `On-Site` and `on_site` agree.
fn choice_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl EmploymentType {
    pub fn from_key(raw: &str) -> Option<Self> {
        match choice_key(raw).as_str() {
            "full_time" => Some(Self::FullTime),
            "part_time" => Some(Self::PartTime),
            "contract" => Some(Self::Contract),
            "internship" => Some(Self::Internship),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full Time",
            EmploymentType::PartTime => "Part Time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn from_key(raw: &str) -> Option<Self> {
        match choice_key(raw).as_str() {
            "entry" => Some(Self::Entry),
            "mid" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            "executive" => Some(Self::Executive),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
            ExperienceLevel::Executive => "Executive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkMode {
    Remote,
    #[default]
    OnSite,
    Hybrid,
}

impl WorkMode {
    pub fn from_key(raw: &str) -> Option<Self> {
        match choice_key(raw).as_str() {
            "remote" => Some(Self::Remote),
            "on_site" | "onsite" => Some(Self::OnSite),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WorkMode::Remote => "Remote",
            WorkMode::OnSite => "On-site",
            WorkMode::Hybrid => "Hybrid",
        }
    }
}

/// Advertised pay band in whole currency units. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl SalaryRange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(ValidationError::SalaryRange { min, max }),
            _ => Ok(()),
        }
    }
}

/// Recruiter-supplied fields for creating or editing a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub job_type: EmploymentType,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub work_location: WorkMode,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    #[serde(default)]
    pub visa_sponsorship: bool,
    /// Skill names; resolved through the skill catalogue on save.
    #[serde(default)]
    pub skills: Vec<String>,
    pub description: String,
    pub requirements: String,
}

/// Draft after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidDraft {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: String,
    pub(crate) job_type: EmploymentType,
    pub(crate) experience_level: ExperienceLevel,
    pub(crate) work_location: WorkMode,
    pub(crate) salary: SalaryRange,
    pub(crate) visa_sponsorship: bool,
    pub(crate) skills: Vec<String>,
    pub(crate) description: String,
    pub(crate) requirements: String,
}

impl PostingDraft {
    pub(crate) fn validate(self) -> Result<ValidDraft, ValidationError> {
        let salary = SalaryRange {
            min: self.salary_min,
            max: self.salary_max,
        };
        salary.validate()?;

        Ok(ValidDraft {
            title: required(&self.title, "title")?,
            company: required(&self.company, "company")?,
            location: required(&self.location, "location")?,
            job_type: self.job_type,
            experience_level: self.experience_level,
            work_location: self.work_location,
            salary,
            visa_sponsorship: self.visa_sponsorship,
            skills: self.skills,
            description: required(&self.description, "description")?,
            requirements: required(&self.requirements, "requirements")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: PostingId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub work_location: WorkMode,
    pub salary: SalaryRange,
    pub visa_sponsorship: bool,
    pub required_skills: BTreeSet<SkillId>,
    pub description: String,
    pub requirements: String,
    pub posted_by: UserId,
    /// Cleared by soft delete; inactive postings are only visible to their owner.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.posted_by == user
    }

    pub(crate) fn from_draft(
        id: PostingId,
        posted_by: UserId,
        draft: ValidDraft,
        required_skills: BTreeSet<SkillId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            company: draft.company,
            location: draft.location,
            job_type: draft.job_type,
            experience_level: draft.experience_level,
            work_location: draft.work_location,
            salary: draft.salary,
            visa_sponsorship: draft.visa_sponsorship,
            required_skills,
            description: draft.description,
            requirements: draft.requirements,
            posted_by,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply_draft(&mut self, draft: ValidDraft, required_skills: BTreeSet<SkillId>) {
        self.title = draft.title;
        self.company = draft.company;
        self.location = draft.location;
        self.job_type = draft.job_type;
        self.experience_level = draft.experience_level;
        self.work_location = draft.work_location;
        self.salary = draft.salary;
        self.visa_sponsorship = draft.visa_sponsorship;
        self.required_skills = required_skills;
        self.description = draft.description;
        self.requirements = draft.requirements;
    }
}

/// Default listing order: newest posting first, later ids winning ties.
pub fn newest_first(left: &JobPosting, right: &JobPosting) -> Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| right.id.cmp(&left.id))
}

/// Posting rendered for API consumers with skill names and display labels.
#[derive(Debug, Clone, Serialize)]
pub struct PostingView {
    pub id: PostingId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: EmploymentType,
    pub job_type_label: &'static str,
    pub experience_level: ExperienceLevel,
    pub experience_level_label: &'static str,
    pub work_location: WorkMode,
    pub work_location_label: &'static str,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub visa_sponsorship: bool,
    pub skills: Vec<String>,
    pub description: String,
    pub requirements: String,
    pub posted_by: UserId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostingView {
    pub fn new(posting: &JobPosting, skills: Vec<String>) -> Self {
        Self {
            id: posting.id,
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            job_type: posting.job_type,
            job_type_label: posting.job_type.label(),
            experience_level: posting.experience_level,
            experience_level_label: posting.experience_level.label(),
            work_location: posting.work_location,
            work_location_label: posting.work_location.label(),
            salary_min: posting.salary.min,
            salary_max: posting.salary.max,
            visa_sponsorship: posting.visa_sponsorship,
            skills,
            description: posting.description.clone(),
            requirements: posting.requirements.clone(),
            posted_by: posting.posted_by,
            is_active: posting.active,
            created_at: posting.created_at,
            updated_at: posting.updated_at,
        }
    }
}
