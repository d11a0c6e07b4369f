//! Storage layer: atomic files and the key-value store backends.

mod atomic_file;
mod file_store;
mod memory_store;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
