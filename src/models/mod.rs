//! Database models shared across the repository layer.

#[cfg(feature = "server")]
pub mod auth;
pub mod blog;
pub mod catalog;
#[cfg(feature = "server")]
pub mod config;
pub mod document;
pub mod hr;
pub mod job;
pub mod lead;
pub mod lead_event;
pub mod notification;
pub mod order;
pub mod team;
