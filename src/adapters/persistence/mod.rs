//! Persistence Adapters - File-based Ledger Storage
//!
//! Implements the `LedgerRepository` port with an atomic JSON snapshot
//! of the whole ledger and an append-only JSONL audit log.
//! No database dependency.

pub mod event_log;
pub mod repository_impl;
pub mod snapshot;

pub use event_log::EventLog;
pub use repository_impl::RepositoryImpl;
pub use snapshot::SnapshotStore;
