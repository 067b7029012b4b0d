//! Shared configuration, errors and constants for the vCard 3.0 engine.

pub mod config;
pub mod constants;
pub mod error;
