#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for lockcheck
//!
//! This crate holds the data shared between the comparison, reporting and
//! orchestration layers: the named lock file set and verification outcomes.

pub mod lock;
pub mod outcome;

pub use lock::LockFileSet;
pub use outcome::{Mismatch, VerificationOutcome};
