//! DTO modules that bridge services with templates and APIs.

pub mod jobs;
pub mod lead;
pub mod main;
pub mod orders;
