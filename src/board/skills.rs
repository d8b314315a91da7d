use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{BoardError, RepositoryError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub u64);

/// Shared tag referenced by posting requirements and seeker profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Key used for case-insensitive skill identity.
pub fn skill_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Storage for the skill table. Names are unique under [`skill_key`].
pub trait SkillRepository: Send + Sync {
    /// Return the skill whose key matches `name`, creating it with `name` as
    /// the canonical spelling when absent. Must be atomic per key.
    fn find_or_create_skill(&self, name: &str) -> Result<Skill, RepositoryError>;
    fn find_skill(&self, name: &str) -> Result<Option<Skill>, RepositoryError>;
    fn fetch_skills(&self, ids: &BTreeSet<SkillId>) -> Result<Vec<Skill>, RepositoryError>;
}

/// Find-or-create front end over a [`SkillRepository`].
pub struct SkillCatalog<S> {
    store: Arc<S>,
}

impl<S> SkillCatalog<S>
where
    S: SkillRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn find_or_create(&self, name: &str) -> Result<Skill, BoardError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Blank { field: "skill" }.into());
        }
        let skill = self.store.find_or_create_skill(trimmed)?;
        debug!(skill = %skill.name, requested = trimmed, "skill resolved");
        Ok(skill)
    }

    /// Resolve a free-form list into skill ids, creating unknown names.
    /// Blank entries are dropped.
    pub fn resolve_all(&self, names: &[String]) -> Result<BTreeSet<SkillId>, BoardError> {
        names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| self.find_or_create(name).map(|skill| skill.id))
            .collect()
    }

    pub fn lookup(&self, name: &str) -> Result<Option<Skill>, BoardError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(self.store.find_skill(trimmed)?)
    }

    /// Resolve names without creating anything; unknown names are skipped.
    pub fn lookup_all(&self, names: &[String]) -> Result<BTreeSet<SkillId>, BoardError> {
        let mut ids = BTreeSet::new();
        for name in names {
            if let Some(skill) = self.lookup(name)? {
                ids.insert(skill.id);
            }
        }
        Ok(ids)
    }

    /// Canonical names for a set of ids, sorted case-insensitively.
    pub fn names(&self, ids: &BTreeSet<SkillId>) -> Result<Vec<String>, BoardError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = self
            .store
            .fetch_skills(ids)?
            .into_iter()
            .map(|skill| skill.name)
            .collect();
        names.sort_by_key(|name| skill_key(name));
        Ok(names)
    }
}

impl<S> Clone for SkillCatalog<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
