//! Storage abstraction and implementations for Keepsake.
//!
//! This crate provides a trait-based anniversary store, a JSON file
//! reference implementation, and the normalization that turns loosely typed
//! persisted records into [`keepsake_core::Anniversary`].

#![warn(missing_docs)]

pub mod trait_;
pub mod record;
pub mod json_storage;

pub use trait_::{Storage, StorageError, Result};
pub use record::{normalize, normalize_all, RawAnniversary};
pub use json_storage::JsonStorage;
