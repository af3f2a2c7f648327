//! Shared infrastructure utilities for dicebag.
//!
//! This crate provides cross-cutting utilities that don't belong in the
//! domain-pure `dicebag-types` crate:
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)

pub mod atomic_write;

pub use atomic_write::{atomic_write, recover_bak_file};
