//! # Stateout Core
//!
//! Reads output values from a persisted infrastructure state and renders them
//! as text, JSON or raw scalars, reporting every failure as a [`Diagnostic`].
//!
//! ## Pipeline
//!
//! 1. [`OutputRetriever`] asks the state backend for the root module outputs.
//! 2. [`OutputFormat`] renders them through a [`View`].
//! 3. [`View::diagnostics`] sorts, consolidates and prints whatever went wrong.
//!
//! ## Laws
//!
//! - No `unwrap()` / `expect()` / `panic!()` outside tests
//! - Diagnostics are values threaded through each stage, never global state

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod diagnostics;
mod error;
mod output_format;
pub mod retrieve;
pub mod state;
pub mod values;
pub mod view;

pub use config::{ColorChoice, Config};
pub use diagnostics::{Diagnostic, Diagnostics, Severity, SourceLookup, SourcePos, SourceRange};
pub use error::{BackendError, ConfigError, Error, Result, WorkspaceError};
pub use output_format::OutputFormat;
pub use retrieve::{OutputRetriever, Retrieved, RetrievalStage};
pub use values::{OutputSet, OutputValue, ValueKind};
pub use view::{BufferUi, Channel, RenderConfig, TerminalUi, Ui, View};
