//! In-process record store backing every repository trait.
//!
//! Each table sits behind its own mutex, so uniqueness checks (usernames,
//! skill names, one application per job and applicant) happen atomically with
//! the insert they guard.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::accounts::{Account, AccountRepository, UserId};
use super::applications::{Application, ApplicationId, ApplicationRepository};
use super::error::RepositoryError;
use super::postings::{JobPosting, PostingId, PostingRepository};
use super::skills::{skill_key, Skill, SkillId, SkillRepository};

#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<UserId, Account>>,
    skills: Mutex<SkillTable>,
    postings: Mutex<HashMap<PostingId, JobPosting>>,
    applications: Mutex<ApplicationTable>,
}

#[derive(Default)]
struct SkillTable {
    by_id: BTreeMap<SkillId, Skill>,
    by_key: HashMap<String, SkillId>,
    next_id: u64,
}

#[derive(Default)]
struct ApplicationTable {
    by_id: HashMap<ApplicationId, Application>,
    pairs: HashSet<(PostingId, UserId)>,
}

fn lock<'a, T>(table: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    table
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} table lock poisoned")))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for MemoryStore {
    fn insert_account(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut guard = lock(&self.accounts, "accounts")?;
        let username = account.username.to_lowercase();
        let taken = guard.values().any(|existing| {
            existing.id == account.id || existing.username.to_lowercase() == username
        });
        if taken {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id, account.clone());
        Ok(account)
    }

    fn update_account(&self, account: Account) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.accounts, "accounts")?;
        match guard.get_mut(&account.id) {
            Some(slot) => {
                *slot = account;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_account(&self, id: UserId) -> Result<Option<Account>, RepositoryError> {
        let guard = lock(&self.accounts, "accounts")?;
        Ok(guard.get(&id).cloned())
    }
}

impl SkillRepository for MemoryStore {
    fn find_or_create_skill(&self, name: &str) -> Result<Skill, RepositoryError> {
        let mut guard = lock(&self.skills, "skills")?;
        let key = skill_key(name);
        if let Some(id) = guard.by_key.get(&key).copied() {
            if let Some(skill) = guard.by_id.get(&id) {
                return Ok(skill.clone());
            }
        }

        guard.next_id += 1;
        let skill = Skill {
            id: SkillId(guard.next_id),
            name: name.trim().to_string(),
        };
        guard.by_key.insert(key, skill.id);
        guard.by_id.insert(skill.id, skill.clone());
        Ok(skill)
    }

    fn find_skill(&self, name: &str) -> Result<Option<Skill>, RepositoryError> {
        let guard = lock(&self.skills, "skills")?;
        Ok(guard
            .by_key
            .get(&skill_key(name))
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }

    fn fetch_skills(&self, ids: &BTreeSet<SkillId>) -> Result<Vec<Skill>, RepositoryError> {
        let guard = lock(&self.skills, "skills")?;
        Ok(ids
            .iter()
            .filter_map(|id| guard.by_id.get(id))
            .cloned()
            .collect())
    }
}

impl PostingRepository for MemoryStore {
    fn insert_posting(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = lock(&self.postings, "postings")?;
        if guard.contains_key(&posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(posting.id, posting.clone());
        Ok(posting)
    }

    fn update_posting(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.postings, "postings")?;
        match guard.get_mut(&posting.id) {
            Some(slot) => {
                *slot = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_posting(&self, id: PostingId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = lock(&self.postings, "postings")?;
        Ok(guard.get(&id).cloned())
    }

    fn active_postings(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = lock(&self.postings, "postings")?;
        Ok(guard
            .values()
            .filter(|posting| posting.active)
            .cloned()
            .collect())
    }

    fn postings_by(&self, owner: UserId) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = lock(&self.postings, "postings")?;
        Ok(guard
            .values()
            .filter(|posting| posting.posted_by == owner)
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for MemoryStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        let mut guard = lock(&self.applications, "applications")?;
        let pair = (application.job_id, application.applicant);
        if guard.pairs.contains(&pair) || guard.by_id.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.pairs.insert(pair);
        guard.by_id.insert(application.id, application.clone());
        Ok(application)
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.applications, "applications")?;
        match guard.by_id.get_mut(&application.id) {
            Some(slot)
                if slot.job_id == application.job_id
                    && slot.applicant == application.applicant =>
            {
                *slot = application;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = lock(&self.applications, "applications")?;
        Ok(guard.by_id.get(&id).cloned())
    }

    fn applications_for_job(&self, job: PostingId) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.applications, "applications")?;
        Ok(guard
            .by_id
            .values()
            .filter(|application| application.job_id == job)
            .cloned()
            .collect())
    }

    fn applications_by(&self, applicant: UserId) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.applications, "applications")?;
        Ok(guard
            .by_id
            .values()
            .filter(|application| application.applicant == applicant)
            .cloned()
            .collect())
    }
}
