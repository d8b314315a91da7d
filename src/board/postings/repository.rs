use crate::board::accounts::UserId;
use crate::board::error::RepositoryError;

use super::domain::{JobPosting, PostingId};

/// Storage abstraction for job postings. Postings are never removed.
pub trait PostingRepository: Send + Sync {
    fn insert_posting(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn update_posting(&self, posting: JobPosting) -> Result<(), RepositoryError>;
    fn fetch_posting(&self, id: PostingId) -> Result<Option<JobPosting>, RepositoryError>;
    fn active_postings(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    /// Every posting owned by `owner`, active or not.
    fn postings_by(&self, owner: UserId) -> Result<Vec<JobPosting>, RepositoryError>;
}
