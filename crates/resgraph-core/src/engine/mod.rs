//! # Engine Module
//!
//! Runtime plumbing shared by the workflows: validated configuration, the error type
//! surfaced by a pipeline run, and progress reporting.
//!
//! - **Configuration** ([`config`]) - Graph construction parameters and their builder
//! - **Error Handling** ([`error`]) - Pipeline errors tagged with the failing phase
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod config;
pub mod error;
pub mod progress;
