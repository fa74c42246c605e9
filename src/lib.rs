//! Leadflow — lead-generation discovery funnel backend.

pub mod chat;
pub mod config;
pub mod contact;
pub mod error;
pub mod intake;
pub mod llm;
pub mod mailer;
pub mod report;
pub mod server;
pub mod workflow;
