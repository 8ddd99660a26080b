//! Core types and trait definitions for Sevakio user registration.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store, identity and server crates depend on it; it depends on nothing
//! proprietary.

pub mod claim;
pub mod error;
pub mod profile;
pub mod provider;
pub mod register;
pub mod store;
pub mod verify;

pub use error::{AuthError, ProviderError, RegisterError, Result, ValidationError};
