//! Key-value persistence
//!
//! Features:
//! - Small `Storage` trait (get/set string by key)
//! - In-memory backend for tests and native runs
//! - LocalStorage backend on web
//!
//! Readers treat missing or unparseable values as "nothing saved yet".

pub mod storage;

pub use storage::{MemoryStorage, Storage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
