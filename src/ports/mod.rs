//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use-case layer requires from
//! the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `LedgerRepository`: Snapshot + audit log persistence
//! - `Notifier`: Reminder delivery
//! - `ResultFeed`: Match result lookup

pub mod notifier;
pub mod repository;
pub mod result_feed;
