//! Unable - recover plain AIFC audio from able-encrypted files
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod convert;
