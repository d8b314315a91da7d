use std::collections::BTreeSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::board::accounts::{Account, AccountRepository, Registration, RoleKind, UserId};
use crate::board::applications::{Application, ApplicationId, ApplicationRepository};
use crate::board::error::RepositoryError;
use crate::board::postings::{
    EmploymentType, ExperienceLevel, JobPosting, PostingDraft, PostingId, PostingRepository,
    SalaryRange, WorkMode,
};
use crate::board::router::USER_HEADER;
use crate::board::skills::{Skill, SkillId, SkillRepository};
use crate::board::{board_router, JobBoard, MemoryStore};

pub(super) fn board() -> JobBoard<MemoryStore> {
    JobBoard::in_memory()
}

pub(super) fn shared_board() -> Arc<JobBoard<MemoryStore>> {
    Arc::new(board())
}

pub(super) fn router_with_board(board: Arc<JobBoard<MemoryStore>>) -> axum::Router {
    board_router(board)
}

pub(super) fn recruiter(board: &JobBoard<MemoryStore>, username: &str) -> Account {
    board
        .accounts()
        .register(Registration {
            username: username.to_string(),
            role: RoleKind::Recruiter,
            display_name: None,
            company: Some("Northwind Labs".to_string()),
        })
        .expect("recruiter registers")
}

pub(super) fn seeker(board: &JobBoard<MemoryStore>, username: &str) -> Account {
    board
        .accounts()
        .register(Registration {
            username: username.to_string(),
            role: RoleKind::JobSeeker,
            display_name: None,
            company: None,
        })
        .expect("seeker registers")
}

pub(super) fn draft(title: &str) -> PostingDraft {
    PostingDraft {
        title: title.to_string(),
        company: "Northwind Labs".to_string(),
        location: "Berlin, Germany".to_string(),
        job_type: EmploymentType::FullTime,
        experience_level: ExperienceLevel::Mid,
        work_location: WorkMode::Hybrid,
        salary_min: Some(60_000),
        salary_max: Some(85_000),
        visa_sponsorship: false,
        skills: vec!["Rust".to_string()],
        description: "Build and operate the matching pipeline.".to_string(),
        requirements: "Three years of backend experience.".to_string(),
    }
}

pub(super) fn skilled_draft(title: &str, skills: &[&str]) -> PostingDraft {
    PostingDraft {
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        ..draft(title)
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Stored posting built without going through the service, for pure filter
/// checks. Later ids are created later.
pub(super) fn posting(id: u64) -> JobPosting {
    let created_at = epoch() + Duration::hours(id as i64);
    JobPosting {
        id: PostingId(id),
        title: "Backend Engineer".to_string(),
        company: "Northwind Labs".to_string(),
        location: "Berlin, Germany".to_string(),
        job_type: EmploymentType::FullTime,
        experience_level: ExperienceLevel::Mid,
        work_location: WorkMode::OnSite,
        salary: SalaryRange::default(),
        visa_sponsorship: false,
        required_skills: BTreeSet::new(),
        description: "Own the ingestion service.".to_string(),
        requirements: "Rust or Go.".to_string(),
        posted_by: UserId(1),
        active: true,
        created_at,
        updated_at: created_at,
    }
}

pub(super) fn skill_set(ids: &[u64]) -> BTreeSet<SkillId> {
    ids.iter().copied().map(SkillId).collect()
}

/// Store whose every table is unreachable.
pub(super) struct UnavailableStore;

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}

impl AccountRepository for UnavailableStore {
    fn insert_account(&self, _account: Account) -> Result<Account, RepositoryError> {
        Err(unavailable())
    }

    fn update_account(&self, _account: Account) -> Result<(), RepositoryError> {
        Err(unavailable())
    }

    fn fetch_account(&self, _id: UserId) -> Result<Option<Account>, RepositoryError> {
        Err(unavailable())
    }
}

impl SkillRepository for UnavailableStore {
    fn find_or_create_skill(&self, _name: &str) -> Result<Skill, RepositoryError> {
        Err(unavailable())
    }

    fn find_skill(&self, _name: &str) -> Result<Option<Skill>, RepositoryError> {
        Err(unavailable())
    }

    fn fetch_skills(&self, _ids: &BTreeSet<SkillId>) -> Result<Vec<Skill>, RepositoryError> {
        Err(unavailable())
    }
}

impl PostingRepository for UnavailableStore {
    fn insert_posting(&self, _posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        Err(unavailable())
    }

    fn update_posting(&self, _posting: JobPosting) -> Result<(), RepositoryError> {
        Err(unavailable())
    }

    fn fetch_posting(&self, _id: PostingId) -> Result<Option<JobPosting>, RepositoryError> {
        Err(unavailable())
    }

    fn active_postings(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(unavailable())
    }

    fn postings_by(&self, _owner: UserId) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(unavailable())
    }
}

impl ApplicationRepository for UnavailableStore {
    fn insert_application(
        &self,
        _application: Application,
    ) -> Result<Application, RepositoryError> {
        Err(unavailable())
    }

    fn update_application(&self, _application: Application) -> Result<(), RepositoryError> {
        Err(unavailable())
    }

    fn fetch_application(
        &self,
        _id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(unavailable())
    }

    fn applications_for_job(&self, _job: PostingId) -> Result<Vec<Application>, RepositoryError> {
        Err(unavailable())
    }

    fn applications_by(&self, _applicant: UserId) -> Result<Vec<Application>, RepositoryError> {
        Err(unavailable())
    }
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    actor: Option<UserId>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(USER_HEADER, actor.0.to_string());
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&body).expect("serialize request body"),
            ))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
