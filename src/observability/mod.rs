//! Structured logging routed to the host console.
//!
//! All crate code logs through `tracing` macros and spans. This module installs
//! the subscriber that turns them into console output.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (ChronoTimer) → ConsoleWriter → console.* / stderr
//! ```
//!
//! # Configuration
//!
//! The level comes from the `trace_level` config option; default: `"info"`.
//! There is no environment to read `RUST_LOG` from inside a browser.
//!
//! # Usage
//!
//! Initialize tracing before binding the page:
//!
//! ```rust
//! use place_actions::observability::init_tracing;
//! use place_actions::Config;
//!
//! init_tracing(&Config::default());
//!
//! tracing::info!("dispatcher starting");
//! ```
//!
//! # Modules
//!
//! - [`init`]: subscriber setup and timestamp formatting
//! - [`console_writer`]: level-routed console writer

pub mod console_writer;
pub mod init;

pub use console_writer::ConsoleWriter;
pub use init::{init_tracing, ChronoTimer};
