//! Volunteer, task, and event management for small organizations.
//!
//! The heart of the crate is [`workflows::matching`], which ranks volunteers against a task's
//! domain. The remaining workflows are record keeping around it, exposed through axum routers
//! that the `volunteer-hub-api` service composes.

pub mod access;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
