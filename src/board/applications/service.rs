use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{newest_first, Application, ApplicationId, ApplicationStatus};
use super::repository::ApplicationRepository;
use crate::board::accounts::Account;
use crate::board::error::{BoardError, RepositoryError, Resource};
use crate::board::input::required;
use crate::board::postings::{JobPosting, PostingId, PostingRepository};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    ApplicationId(APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Application intake and the recruiter-driven status lifecycle.
pub struct ApplicationService<S> {
    store: Arc<S>,
}

impl<S> ApplicationService<S>
where
    S: ApplicationRepository + PostingRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Submit an application to an active posting.
    pub fn apply(
        &self,
        actor: &Account,
        job_id: PostingId,
        cover_note: &str,
    ) -> Result<Application, BoardError> {
        actor.require_job_seeker("apply to jobs")?;
        let posting = self.posting(job_id)?;
        if !posting.active {
            return Err(BoardError::NotFound(Resource::Posting));
        }
        let cover_note = required(cover_note, "cover_note")?;

        let now = Utc::now();
        let application = Application {
            id: next_application_id(),
            job_id,
            applicant: actor.id,
            cover_note,
            status: ApplicationStatus::Applied,
            applied_at: now,
            status_updated_at: now,
        };

        let stored = self
            .store
            .insert_application(application)
            .map_err(|err| match err {
                RepositoryError::Conflict => {
                    warn!(job_id = job_id.0, applicant = actor.id.0, "duplicate application");
                    BoardError::DuplicateApplication
                }
                other => other.into(),
            })?;
        info!(
            application_id = stored.id.0,
            job_id = job_id.0,
            applicant = actor.id.0,
            "application submitted"
        );
        Ok(stored)
    }

    /// Move an application to any status in the vocabulary. Only the
    /// recruiter owning the posting may do so.
    pub fn update_status(
        &self,
        actor: &Account,
        id: ApplicationId,
        new_status: &str,
    ) -> Result<Application, BoardError> {
        const ACTION: &str = "change the status of this application";
        actor.require_recruiter(ACTION)?;

        let mut application = self.application(id)?;
        let posting = self.posting(application.job_id)?;
        if !posting.is_owned_by(actor.id) {
            return Err(BoardError::denied(ACTION));
        }

        let status = ApplicationStatus::parse(new_status)?;
        let previous = application.status;
        application.status = status;
        application.status_updated_at = Utc::now();
        self.store.update_application(application.clone())?;

        info!(
            application_id = id.0,
            from = previous.label(),
            to = status.label(),
            "application status changed"
        );
        Ok(application)
    }

    /// Applications received by one posting, for its owner.
    pub fn for_job(
        &self,
        actor: &Account,
        job_id: PostingId,
    ) -> Result<Vec<Application>, BoardError> {
        const ACTION: &str = "view applications for this job posting";
        actor.require_recruiter(ACTION)?;
        let posting = self.posting(job_id)?;
        if !posting.is_owned_by(actor.id) {
            return Err(BoardError::denied(ACTION));
        }

        let mut applications = self.store.applications_for_job(job_id)?;
        applications.sort_by(newest_first);
        Ok(applications)
    }

    /// The seeker's own applications.
    pub fn submitted_by(&self, actor: &Account) -> Result<Vec<Application>, BoardError> {
        actor.require_job_seeker("list submitted applications")?;
        let mut applications = self.store.applications_by(actor.id)?;
        applications.sort_by(newest_first);
        Ok(applications)
    }

    /// Visible to the applicant and to the recruiter owning the posting.
    pub fn get(&self, actor: &Account, id: ApplicationId) -> Result<Application, BoardError> {
        let application = self.application(id)?;
        if application.applicant == actor.id {
            return Ok(application);
        }

        let posting = self.posting(application.job_id)?;
        if posting.is_owned_by(actor.id) {
            Ok(application)
        } else {
            Err(BoardError::denied("view this application"))
        }
    }

    fn application(&self, id: ApplicationId) -> Result<Application, BoardError> {
        self.store
            .fetch_application(id)?
            .ok_or(BoardError::NotFound(Resource::Application))
    }

    fn posting(&self, id: PostingId) -> Result<JobPosting, BoardError> {
        self.store
            .fetch_posting(id)?
            .ok_or(BoardError::NotFound(Resource::Posting))
    }
}
