//! Jobwatch Core
//!
//! Core types shared by the admin API client, the status poller and the CLI.
//!
//! This crate contains:
//! - Domain types: job snapshots, status codes, job kinds and terminal sets
//! - DTOs: request bodies used to submit new jobs to the admin API

pub mod domain;
pub mod dto;
