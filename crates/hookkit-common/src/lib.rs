//! # hookkit-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the entire hookkit workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the container configuration document that
//! hook plugins mutate before the launcher persists it.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
