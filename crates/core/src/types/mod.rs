//! Core types for Pazar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod money;
pub mod status;

pub use customer::{CustomerType, CustomerTypeError};
pub use id::*;
pub use money::{format_commission_rate, format_percentage, format_price, round2};
pub use status::*;
