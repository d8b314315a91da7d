//! Job postings: recruiter-owned catalogue entries and the search filter.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod service;

pub use domain::{
    EmploymentType, ExperienceLevel, JobPosting, PostingDraft, PostingId, PostingView,
    SalaryRange, WorkMode,
};
pub use filter::{SearchCriteria, SearchParams};
pub use repository::PostingRepository;
pub use service::PostingService;
