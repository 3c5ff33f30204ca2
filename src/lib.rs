//! StudyFlow: the logic behind a study-focused browser productivity extension.
//!
//! Site-time analytics, bookmark ranking and import, goals, reminders, notes,
//! a site blocker and focus sessions. The browser extension's background
//! service is reached through [`services::messaging::MessageSender`].

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
