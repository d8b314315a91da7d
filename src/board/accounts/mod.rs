//! Role-tagged accounts and the profile data each role carries.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{
    Account, AccountView, Education, JobSeekerProfile, ProfileLink, ProfileUpdate, ProfileView,
    RecruiterProfile, Registration, Role, RoleKind, UserId, WorkExperience,
};
pub use repository::AccountRepository;
pub use service::AccountService;
