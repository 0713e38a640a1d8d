//! Integration test suite for distvars
//!
//! End-to-end tests for the `distvars` binary and the public library API.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: subcommands run through the real binary
//! - **environment**: env file discovery, parsing and tier precedence
//! - **lifecycle**: both host generations driven through `Plugin`

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod environment;
mod lifecycle;
