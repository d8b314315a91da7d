use crate::board::accounts::UserId;
use crate::board::error::RepositoryError;
use crate::board::postings::PostingId;

use super::domain::{Application, ApplicationId};

/// Storage abstraction for applications.
pub trait ApplicationRepository: Send + Sync {
    /// Insert unless the (job, applicant) pair already has an application, in
    /// which case [`RepositoryError::Conflict`] is returned and the existing
    /// record is left untouched. The check and insert must be atomic.
    fn insert_application(&self, application: Application)
        -> Result<Application, RepositoryError>;
    fn update_application(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch_application(&self, id: ApplicationId)
        -> Result<Option<Application>, RepositoryError>;
    fn applications_for_job(&self, job: PostingId) -> Result<Vec<Application>, RepositoryError>;
    fn applications_by(&self, applicant: UserId) -> Result<Vec<Application>, RepositoryError>;
}
