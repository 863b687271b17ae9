//! Filesystem utilities for containercraft.
//!
//! Generated workspace files are written atomically so an interrupted run
//! never leaves a half-written descriptor behind, and copied files keep the
//! permissions and timestamps of their source.

pub mod atomic;
mod copy;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
pub use copy::{copy_preserving_metadata, ensure_dir, set_executable};
