//! Pazar Core - Shared domain types.
//!
//! This crate provides the types shared by every Pazar component:
//! - `engine` - Price computation and cart/order consistency engine
//! - `cli` - Command-line tools for quoting and validating against fixtures
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no async. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, money helpers, customer classes and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
