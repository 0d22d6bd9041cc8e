//! Attribute directory implementations for the presslink handoff protocol.
//!
//! This crate provides the platform-backed implementation of the
//! `AttributeDirectory` trait from presslink-traits.
//!
//! ## Available Directories
//!
//! - [`FilesystemAttributeDirectory`]: one value file per name under a
//!   per-device base directory
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory directory from
//! presslink-traits:
//! - [`InMemoryAttributeDirectory`]: process-local storage

mod filesystem;

pub use filesystem::FilesystemAttributeDirectory;

// Re-export the in-memory directory from presslink-traits for convenience
pub use presslink_traits::InMemoryAttributeDirectory;
