//! # hookchain-core
//!
//! Core crate for hookchain. Contains the unified error system,
//! configuration schemas, and logging initialisation shared by the
//! dispatcher and by host applications embedding it.
//!
//! This crate has **no** internal dependencies on other hookchain crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, HookError};
pub use result::HookResult;
