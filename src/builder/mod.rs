//! Builder API for ergonomic configuration construction.
//!
//! This module provides a fluent builder and the [`fsm_config!`](crate::fsm_config)
//! macro for declaring machines with minimal boilerplate.

pub mod config;
pub mod macros;

pub use config::ConfigurationBuilder;
