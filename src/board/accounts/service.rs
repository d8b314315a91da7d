use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::domain::{
    Account, AccountView, Education, JobSeekerProfile, ProfileLink, ProfileUpdate, ProfileView,
    RecruiterProfile, Registration, Role, RoleKind, UserId, WorkExperience,
};
use super::repository::AccountRepository;
use crate::board::error::{BoardError, RepositoryError, Resource, ValidationError};
use crate::board::input::{optional, required};
use crate::board::skills::{SkillCatalog, SkillRepository};

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    UserId(USER_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Registration and profile maintenance.
pub struct AccountService<S> {
    store: Arc<S>,
    skills: SkillCatalog<S>,
}

impl<S> AccountService<S>
where
    S: AccountRepository + SkillRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        let skills = SkillCatalog::new(Arc::clone(&store));
        Self { store, skills }
    }

    pub fn register(&self, registration: Registration) -> Result<Account, BoardError> {
        let username = required(&registration.username, "username")?;
        let role = match registration.role {
            RoleKind::JobSeeker => Role::JobSeeker(JobSeekerProfile::default()),
            RoleKind::Recruiter => Role::Recruiter(RecruiterProfile {
                display_name: optional(registration.display_name.as_deref())
                    .unwrap_or_else(|| username.clone()),
                company: optional(registration.company.as_deref()),
            }),
        };

        let now = Utc::now();
        let account = Account {
            id: next_user_id(),
            username: username.clone(),
            role,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert_account(account).map_err(|err| match err {
            RepositoryError::Conflict => BoardError::DuplicateUsername(username),
            other => other.into(),
        })?;
        info!(user_id = stored.id.0, role = stored.kind().label(), "account registered");
        Ok(stored)
    }

    pub fn get(&self, id: UserId) -> Result<Account, BoardError> {
        self.store
            .fetch_account(id)?
            .ok_or(BoardError::NotFound(Resource::Account))
    }

    /// Replace the profile fields of whichever role the actor holds. Absent
    /// fields reset: a recruiter without a display name falls back to the
    /// username.
    pub fn update_profile(
        &self,
        actor: &Account,
        update: ProfileUpdate,
    ) -> Result<Account, BoardError> {
        let mut account = self.get(actor.id)?;
        match &mut account.role {
            Role::JobSeeker(profile) => {
                profile.headline = optional(update.headline.as_deref());
                profile.email = optional(update.email.as_deref());
                profile.skills = self.skills.resolve_all(&update.skills)?;
            }
            Role::Recruiter(profile) => {
                profile.display_name = optional(update.display_name.as_deref())
                    .unwrap_or_else(|| account.username.clone());
                profile.company = optional(update.company.as_deref());
            }
        }
        self.save(account)
    }

    pub fn add_education(&self, actor: &Account, entry: Education) -> Result<Account, BoardError> {
        let entry = Education {
            school: required(&entry.school, "school")?,
            degree: required(&entry.degree, "degree")?,
            field_of_study: required(&entry.field_of_study, "field_of_study")?,
            description: optional(entry.description.as_deref()),
            ..entry
        };
        check_dates("education", entry.start_date, entry.end_date)?;

        self.edit_seeker_profile(actor, "add education", |profile| {
            profile.push_education(entry)
        })
    }

    pub fn add_experience(
        &self,
        actor: &Account,
        entry: WorkExperience,
    ) -> Result<Account, BoardError> {
        let entry = WorkExperience {
            company: required(&entry.company, "company")?,
            title: required(&entry.title, "title")?,
            location: optional(entry.location.as_deref()),
            description: optional(entry.description.as_deref()),
            ..entry
        };
        check_dates("experience", entry.start_date, entry.end_date)?;

        self.edit_seeker_profile(actor, "add work experience", |profile| {
            profile.push_experience(entry)
        })
    }

    pub fn add_link(&self, actor: &Account, link: ProfileLink) -> Result<Account, BoardError> {
        let name = required(&link.name, "name")?;
        let url = required(&link.url, "url")?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidUrl(url).into());
        }

        self.edit_seeker_profile(actor, "add profile links", |profile| {
            profile.links.push(ProfileLink { name, url })
        })
    }

    /// Render an account with skill names resolved.
    pub fn view(&self, account: &Account) -> Result<AccountView, BoardError> {
        let profile = match &account.role {
            Role::JobSeeker(profile) => ProfileView::JobSeeker {
                headline: profile.headline.clone(),
                email: profile.email.clone(),
                skills: self.skills.names(&profile.skills)?,
                education: profile.education.clone(),
                experience: profile.experience.clone(),
                links: profile.links.clone(),
            },
            Role::Recruiter(profile) => ProfileView::Recruiter {
                display_name: profile.display_name.clone(),
                company: profile.company.clone(),
            },
        };

        Ok(AccountView {
            id: account.id,
            username: account.username.clone(),
            role: account.kind().label(),
            created_at: account.created_at,
            updated_at: account.updated_at,
            profile,
        })
    }

    fn edit_seeker_profile<F>(
        &self,
        actor: &Account,
        action: &'static str,
        edit: F,
    ) -> Result<Account, BoardError>
    where
        F: FnOnce(&mut JobSeekerProfile),
    {
        let mut account = self.get(actor.id)?;
        match &mut account.role {
            Role::JobSeeker(profile) => edit(profile),
            Role::Recruiter(_) => return Err(BoardError::denied(action)),
        }
        self.save(account)
    }

    fn save(&self, mut account: Account) -> Result<Account, BoardError> {
        account.updated_at = Utc::now();
        self.store.update_account(account.clone())?;
        Ok(account)
    }
}

fn check_dates(
    field: &'static str,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::DateRange { field, start, end }),
        _ => Ok(()),
    }
}
