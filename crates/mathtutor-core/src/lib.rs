//! mathtutor-core: Answer validation, progress tracking, streaks and achievements.
//!
//! This crate defines the catalog model, the answer comparator, and the
//! progress/stats/achievement bookkeeping that the `mathtutor` CLI builds on.
//! Storage and catalog loading are abstracted behind the traits in [`traits`].

pub mod achievements;
pub mod catalog;
pub mod error;
pub mod model;
pub mod progress;
pub mod report;
pub mod statistics;
pub mod stats;
pub mod storage;
pub mod traits;
pub mod transfer;
pub mod tutor;
pub mod validator;
