//! # Domain Models
//!
//! Plain data types for the service catalog and server configuration.
//! Keep it lean: `serde` is the only dependency, no I/O, no validation logic.

pub mod config;
pub mod constants;
pub mod service;
