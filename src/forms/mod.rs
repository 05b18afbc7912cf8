//! Form DTOs submitted by the admin pages and portals.

pub mod blog;
pub mod catalog;
pub mod hr;
pub mod jobs;
pub mod lead;
pub mod main;
pub mod schedule;
pub mod teams;
