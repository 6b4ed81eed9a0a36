//! Notification Adapters - Reminder Delivery Channels

pub mod log_notifier;

pub use log_notifier::LogNotifier;
