use crate::board::error::RepositoryError;

use super::domain::{Account, UserId};

/// Storage abstraction for registered accounts.
pub trait AccountRepository: Send + Sync {
    /// Rejects a username already taken under case-insensitive comparison
    /// with [`RepositoryError::Conflict`].
    fn insert_account(&self, account: Account) -> Result<Account, RepositoryError>;
    fn update_account(&self, account: Account) -> Result<(), RepositoryError>;
    fn fetch_account(&self, id: UserId) -> Result<Option<Account>, RepositoryError>;
}
