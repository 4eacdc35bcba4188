//! Command implementations

pub mod output;

pub use output::{Invocation, OutputArgs, OutputCommand};
