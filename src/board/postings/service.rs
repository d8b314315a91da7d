use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{newest_first, JobPosting, PostingDraft, PostingId, PostingView};
use super::filter::{self, SearchCriteria, SearchParams};
use super::repository::PostingRepository;
use crate::board::accounts::Account;
use crate::board::error::{BoardError, Resource};
use crate::board::skills::{SkillCatalog, SkillRepository};

static POSTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_posting_id() -> PostingId {
    PostingId(POSTING_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Posting catalogue: owner-only mutation, seeker-facing listing and search.
pub struct PostingService<S> {
    store: Arc<S>,
    skills: SkillCatalog<S>,
}

impl<S> PostingService<S>
where
    S: PostingRepository + SkillRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        let skills = SkillCatalog::new(Arc::clone(&store));
        Self { store, skills }
    }

    pub fn create(&self, actor: &Account, draft: PostingDraft) -> Result<JobPosting, BoardError> {
        actor.require_recruiter("post jobs")?;
        let draft = draft.validate()?;
        let required_skills = self.skills.resolve_all(&draft.skills)?;

        let posting = JobPosting::from_draft(
            next_posting_id(),
            actor.id,
            draft,
            required_skills,
            Utc::now(),
        );

        let stored = self.store.insert_posting(posting)?;
        info!(posting_id = stored.id.0, recruiter = actor.id.0, "job posting created");
        Ok(stored)
    }

    /// Replace every editable field of an owned posting.
    pub fn update(
        &self,
        actor: &Account,
        id: PostingId,
        draft: PostingDraft,
    ) -> Result<JobPosting, BoardError> {
        let mut posting = self.owned_posting(actor, id, "edit this job posting")?;
        let draft = draft.validate()?;
        let required_skills = self.skills.resolve_all(&draft.skills)?;

        posting.apply_draft(draft, required_skills);
        posting.updated_at = Utc::now();
        self.store.update_posting(posting.clone())?;
        info!(posting_id = id.0, "job posting updated");
        Ok(posting)
    }

    /// Soft delete. Repeated calls leave the posting inactive.
    pub fn deactivate(&self, actor: &Account, id: PostingId) -> Result<JobPosting, BoardError> {
        let mut posting = self.owned_posting(actor, id, "delete this job posting")?;
        if posting.active {
            posting.active = false;
            posting.updated_at = Utc::now();
            self.store.update_posting(posting.clone())?;
            info!(posting_id = id.0, "job posting deactivated");
        }
        Ok(posting)
    }

    /// Fetch one posting. Inactive postings are only visible to their owner.
    pub fn show(&self, viewer: Option<&Account>, id: PostingId) -> Result<JobPosting, BoardError> {
        let posting = self
            .store
            .fetch_posting(id)?
            .ok_or(BoardError::NotFound(Resource::Posting))?;

        let owner_viewing = viewer.is_some_and(|account| posting.is_owned_by(account.id));
        if posting.active || owner_viewing {
            Ok(posting)
        } else {
            Err(BoardError::NotFound(Resource::Posting))
        }
    }

    /// Active postings, newest first.
    pub fn index(&self) -> Result<Vec<JobPosting>, BoardError> {
        self.search_with(&SearchCriteria::default())
    }

    /// Parse boundary parameters and run them through the filter. Skill
    /// names are looked up without creating catalogue entries.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<JobPosting>, BoardError> {
        let criteria =
            SearchCriteria::from_params(params, |names| self.skills.lookup_all(names))?;
        self.search_with(&criteria)
    }

    pub fn search_with(&self, criteria: &SearchCriteria) -> Result<Vec<JobPosting>, BoardError> {
        let active = self.store.active_postings()?;
        let results = filter::apply(criteria, active.into_iter().filter(|posting| posting.active));
        debug!(
            identity = criteria.is_identity(),
            matched = results.len(),
            "posting search"
        );
        Ok(results)
    }

    /// The recruiter's own postings, including inactive ones, newest first.
    pub fn owned_by(&self, actor: &Account) -> Result<Vec<JobPosting>, BoardError> {
        actor.require_recruiter("list owned job postings")?;
        let mut postings = self.store.postings_by(actor.id)?;
        postings.sort_by(newest_first);
        Ok(postings)
    }

    pub fn view(&self, posting: &JobPosting) -> Result<PostingView, BoardError> {
        let skills = self.skills.names(&posting.required_skills)?;
        Ok(PostingView::new(posting, skills))
    }

    pub fn views(&self, postings: &[JobPosting]) -> Result<Vec<PostingView>, BoardError> {
        postings.iter().map(|posting| self.view(posting)).collect()
    }

    fn owned_posting(
        &self,
        actor: &Account,
        id: PostingId,
        action: &'static str,
    ) -> Result<JobPosting, BoardError> {
        actor.require_recruiter(action)?;
        let posting = self
            .store
            .fetch_posting(id)?
            .ok_or(BoardError::NotFound(Resource::Posting))?;
        if !posting.is_owned_by(actor.id) {
            return Err(BoardError::denied(action));
        }
        Ok(posting)
    }
}
