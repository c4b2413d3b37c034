//! Attendance Engine for daily biometric attendance
//!
//! This crate evaluates employees' daily attendance from biometric punches,
//! missions, leaves and scoped special rules, producing penalties, overtime
//! and an audit trace explaining every decision.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
