//! Tracker use-case services.
//!
//! # Responsibility
//! - Orchestrate store access into the read and mutation operations the
//!   presentation layer consumes.
//! - Keep callers decoupled from SQL and ordering details.

pub mod tracker_service;
