//! Filesystem helpers for hooks preparing a container's root filesystem.
//!
//! Provides whole-file text reads and writes and recursive directory
//! creation with explicit permissions.

pub mod dir;
pub mod text;
