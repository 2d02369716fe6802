//! # storage-adapters
//!
//! `RecordStore` implementations, selected by cargo features.

#[cfg(feature = "store-file")]
pub mod file;
#[cfg(feature = "store-memory")]
pub mod memory;

#[cfg(feature = "store-file")]
pub use file::JsonFileStore;
#[cfg(feature = "store-memory")]
pub use memory::MemoryStore;
