//! # JobNest Core
//!
//! Core business logic and domain layer for the JobNest backend.
//! This crate contains the OTP challenge entity, the OTP service with its
//! storage and delivery ports, and the error types shared across the stack.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
