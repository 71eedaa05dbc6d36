//! In-memory storage backend.
//!
//! Stores every item in a `HashMap` wrapped in `Arc<RwLock<_>>`. Used for
//! development and tests where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use itemstore::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
