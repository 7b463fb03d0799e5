//! Data Transfer Objects for the admin API
//!
//! Request bodies sent by the client when submitting new jobs. Responses are
//! plain [`JobRecord`](crate::domain::JobRecord) snapshots.

pub mod job;
