//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - An in-memory document engine
//! - Test fixtures and PDF builders

#![allow(dead_code)]

pub mod fake;
pub mod fixtures;

pub use fake::*;
pub use fixtures::*;
