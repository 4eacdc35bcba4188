//! Stateout CLI
//!
//! Argument handling and the output command. The binary in `main.rs` wires
//! these to the terminal and the local state backend; tests drive
//! [`commands::OutputCommand`] with fake collaborators.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;

pub use error::UsageError;
