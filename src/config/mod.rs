//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides functionality to load the attendance policy from a
//! YAML file: default shift, rest and weekend days, the shortened-day rule,
//! penalty tiers, and overtime caps.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Default shift starts at {}", loader.config().default_shift.start);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, POLICY_FILE};
pub use types::{
    EarlyLeavePolicy, EngineConfig, LatenessTier, PenaltyOverrideMerge, ShortenedDayPolicy,
    day_index,
};
