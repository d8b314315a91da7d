//! Job board service core.
//!
//! Recruiters publish postings, job seekers search them and apply, and both
//! sides keep role-specific profile data. The [`board`] module holds the
//! domain services and HTTP router; [`config`], [`telemetry`] and [`error`]
//! carry the process-level plumbing shared with the service binary.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
