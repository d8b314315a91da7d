//! Job applications and their status lifecycle.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationView, ApplyRequest, StatusUpdate,
};
pub use repository::ApplicationRepository;
pub use service::ApplicationService;
