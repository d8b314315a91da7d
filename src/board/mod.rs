//! Job board domain: accounts, skills, postings, applications, and the HTTP
//! router that exposes them.
//!
//! Services are generic over a single store type implementing every
//! repository trait, mirroring one relational database behind the board.

pub mod accounts;
pub mod applications;
mod error;
mod input;
pub mod postings;
pub mod router;
pub mod skills;
pub mod storage;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use accounts::{
    Account, AccountRepository, AccountService, Registration, Role, RoleKind, UserId,
};
pub use applications::{
    Application, ApplicationId, ApplicationRepository, ApplicationService, ApplicationStatus,
};
pub use error::{BoardError, RepositoryError, Resource, ValidationError};
pub use postings::{
    JobPosting, PostingDraft, PostingId, PostingRepository, PostingService, SearchCriteria,
    SearchParams,
};
pub use router::board_router;
pub use skills::{Skill, SkillCatalog, SkillId, SkillRepository};
pub use storage::MemoryStore;

/// Every table the board needs, behind one store.
pub trait BoardStore:
    AccountRepository + SkillRepository + PostingRepository + ApplicationRepository + 'static
{
}

impl<T> BoardStore for T where
    T: AccountRepository + SkillRepository + PostingRepository + ApplicationRepository + 'static
{
}

/// Facade bundling the board services over a shared store.
pub struct JobBoard<S> {
    accounts: AccountService<S>,
    skills: SkillCatalog<S>,
    postings: PostingService<S>,
    applications: ApplicationService<S>,
}

impl<S> JobBoard<S>
where
    S: BoardStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            accounts: AccountService::new(Arc::clone(&store)),
            skills: SkillCatalog::new(Arc::clone(&store)),
            postings: PostingService::new(Arc::clone(&store)),
            applications: ApplicationService::new(store),
        }
    }

    pub fn accounts(&self) -> &AccountService<S> {
        &self.accounts
    }

    pub fn skills(&self) -> &SkillCatalog<S> {
        &self.skills
    }

    pub fn postings(&self) -> &PostingService<S> {
        &self.postings
    }

    pub fn applications(&self) -> &ApplicationService<S> {
        &self.applications
    }
}

impl JobBoard<MemoryStore> {
    /// Board backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
