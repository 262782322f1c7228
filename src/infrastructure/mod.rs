//! Infrastructure layer - Port implementations
//!
//! This module contains concrete implementations of the application layer ports
//! using actual hardware and system resources.

pub(crate) mod adapters;
pub mod config;
pub mod drivers;
pub mod services;
pub mod tasks;
