//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the tracker's workflows. Each use case is a self-contained
//! business operation.
//!
//! Use cases:
//! - `BetTracker`: Serialized ledger mutations + persistence
//! - `ReminderScheduler`: Periodic reminder delivery
//! - `ResultSync`: Settle pending bets from the result feed

pub mod bet_tracker;
pub mod reminder_scheduler;
pub mod result_sync;
