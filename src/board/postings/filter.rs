//! Search filter composition over job postings.
//!
//! Every supplied criterion is one predicate; a posting is returned only when
//! it satisfies all of them. Absent criteria do not constrain the result, so
//! an empty [`SearchCriteria`] is the identity filter.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{newest_first, EmploymentType, ExperienceLevel, JobPosting, WorkMode};
use crate::board::error::{BoardError, ValidationError};
use crate::board::input::optional;
use crate::board::skills::SkillId;

/// Raw query parameters as received from the HTTP boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub work_location: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub visa_sponsorship: Option<String>,
    /// Comma separated skill names.
    pub skills: Option<String>,
}

impl SearchParams {
    pub fn skill_names(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parsed search criteria. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub work_location: Option<WorkMode>,
    /// Seeker's desired floor.
    pub salary_min: Option<u32>,
    /// Seeker's desired ceiling.
    pub salary_max: Option<u32>,
    /// Only sponsoring postings when set; `false` never excludes sponsors.
    pub visa_sponsorship: bool,
    /// Any-of match against required skills. An empty set matches nothing.
    pub skills: Option<BTreeSet<SkillId>>,
}

impl SearchCriteria {
    /// Parse boundary parameters. `resolve_skills` maps the requested names to
    /// known skill ids and is only invoked when skills were requested.
    pub fn from_params<F>(params: &SearchParams, resolve_skills: F) -> Result<Self, BoardError>
    where
        F: FnOnce(&[String]) -> Result<BTreeSet<SkillId>, BoardError>,
    {
        let skill_names = params.skill_names();
        let skills = if skill_names.is_empty() {
            None
        } else {
            Some(resolve_skills(&skill_names)?)
        };

        Ok(Self {
            title: optional(params.title.as_deref()),
            location: optional(params.location.as_deref()),
            job_type: parse_choice(
                "job_type",
                params.job_type.as_deref(),
                EmploymentType::from_key,
            )?,
            experience_level: parse_choice(
                "experience_level",
                params.experience_level.as_deref(),
                ExperienceLevel::from_key,
            )?,
            work_location: parse_choice(
                "work_location",
                params.work_location.as_deref(),
                WorkMode::from_key,
            )?,
            salary_min: parse_salary("salary_min", params.salary_min.as_deref(), f64::ceil)?,
            salary_max: parse_salary("salary_max", params.salary_max.as_deref(), f64::floor)?,
            visa_sponsorship: params
                .visa_sponsorship
                .as_deref()
                .map(is_truthy)
                .unwrap_or(false),
            skills,
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// True when the posting satisfies every supplied criterion.
    pub fn matches(&self, posting: &JobPosting) -> bool {
        self.matches_text(posting)
            && self.matches_choices(posting)
            && self.matches_salary(posting)
            && (!self.visa_sponsorship || posting.visa_sponsorship)
            && self.matches_skills(posting)
    }

    fn matches_text(&self, posting: &JobPosting) -> bool {
        contains_ignore_case(&posting.title, self.title.as_deref())
            && contains_ignore_case(&posting.location, self.location.as_deref())
    }

    fn matches_choices(&self, posting: &JobPosting) -> bool {
        self.job_type.map_or(true, |wanted| posting.job_type == wanted)
            && self
                .experience_level
                .map_or(true, |wanted| posting.experience_level == wanted)
            && self
                .work_location
                .map_or(true, |wanted| posting.work_location == wanted)
    }

    // The posting's band only has to be able to overlap the seeker's: an open
    // posting bound never excludes it.
    fn matches_salary(&self, posting: &JobPosting) -> bool {
        let floor_ok = match (self.salary_min, posting.salary.max) {
            (Some(floor), Some(posting_max)) => posting_max >= floor,
            _ => true,
        };
        let ceiling_ok = match (self.salary_max, posting.salary.min) {
            (Some(ceiling), Some(posting_min)) => posting_min <= ceiling,
            _ => true,
        };
        floor_ok && ceiling_ok
    }

    fn matches_skills(&self, posting: &JobPosting) -> bool {
        match &self.skills {
            Some(wanted) => !wanted.is_disjoint(&posting.required_skills),
            None => true,
        }
    }
}

/// Filter `postings` by `criteria`, dropping duplicate ids and ordering the
/// result newest first.
pub fn apply<I>(criteria: &SearchCriteria, postings: I) -> Vec<JobPosting>
where
    I: IntoIterator<Item = JobPosting>,
{
    let mut seen = BTreeSet::new();
    let mut matched: Vec<JobPosting> = postings
        .into_iter()
        .filter(|posting| criteria.matches(posting))
        .filter(|posting| seen.insert(posting.id))
        .collect();
    matched.sort_by(newest_first);
    matched
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn parse_choice<T>(
    field: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match optional(raw) {
        None => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .ok_or(ValidationError::InvalidFilter { field, value }),
    }
}

fn parse_salary(
    field: &'static str,
    raw: Option<&str>,
    round: fn(f64) -> f64,
) -> Result<Option<u32>, ValidationError> {
    let Some(value) = optional(raw) else {
        return Ok(None);
    };

    if let Ok(whole) = value.parse::<u32>() {
        return Ok(Some(whole));
    }

    // Floors round up and ceilings round down, so a fractional bound never
    // admits a posting outside the requested range.
    match value.parse::<f64>().map(round) {
        Ok(amount) if amount.is_finite() && amount >= 0.0 && amount <= u32::MAX as f64 => {
            Ok(Some(amount as u32))
        }
        _ => Err(ValidationError::InvalidFilter { field, value }),
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}
