//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP server and client, file I/O, logging).
//! Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: axum JSON API and health probes
//! - `notify`: Reminder delivery channels
//! - `persistence`: JSON ledger snapshot and JSONL audit log
//! - `results`: HTTP match result feed

pub mod api;
pub mod notify;
pub mod persistence;
pub mod results;
