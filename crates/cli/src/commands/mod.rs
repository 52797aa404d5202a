//! CLI subcommands.

pub mod cart;
pub mod quote;
pub mod repeat;
pub mod status;
