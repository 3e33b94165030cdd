//! # Tutor Scheduler Bot
//!
//! A Telegram bot for running a small tutoring business: weekly lesson
//! templates, per-day lesson lists, payment tracking and revenue statistics.
//!
//! ## Features
//! - Weekly lesson templates that turn into dated lessons the first time a day is opened
//! - Marking lessons paid or cancelled from inline buttons
//! - Revenue, teacher payouts and net profit for a day, week, month, year or custom range
//! - Teacher and student rosters with cascading deletion
//! - Optional morning agenda posted to the operator chat
//! - Persistent storage with SQLite

/// Bot command handlers, callback handling and message views
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Error type shared by the scheduling services
pub mod error;
/// Scheduling, roster and statistics services plus background jobs
pub mod services;
/// Utility functions for dates, money, validation, and formatting
pub mod utils;
