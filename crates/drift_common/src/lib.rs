//! Shared foundational types for the Drift compiler driver.
//!
//! This crate provides the content-hash type used for declaration
//! fingerprints and the internal-error types shared by every driver
//! subsystem.

#![warn(missing_docs)]

pub mod hash;
pub mod result;

pub use hash::ContentHash;
pub use result::{DriftResult, InternalError};
