//! Storage abstraction for persistence.
//!
//! Backends are plain key-value stores over strings. [`ProjectStore`]
//! layers the per-user project collection and the session record on top.

mod memory;
mod projects;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use projects::{ProjectStore, SESSION_KEY, projects_key};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for key-value storage backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store a value under a key, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the value stored under a key.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store a value under a key, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the value stored under a key.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Platform-specific default storage type.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

/// Platform-specific default storage type.
#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Create the default storage for the current platform.
///
/// Native builds store one file per key under `dir`, or the platform
/// data directory when `dir` is `None`.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage(dir: Option<std::path::PathBuf>) -> StorageResult<PlatformStorage> {
    match dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::default_location(),
    }
}

/// Create the default storage for the current platform (browser local storage).
#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    LocalStorage::new()
}
