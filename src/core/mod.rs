//! Core library components.
//!
//! This module contains the reusable business logic for configuration
//! caching, envelope encryption, and credential orchestration.

pub mod config;
pub mod constants;
pub mod credentials;
pub mod crypto;
pub mod envfile;
pub mod environment;
pub mod keys;
