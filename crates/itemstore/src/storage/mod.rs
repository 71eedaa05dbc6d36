//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ItemRepository`
//! trait defined in `itemstore_core::storage`. The backend is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMap behind a tokio `RwLock`, nothing persisted
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p itemstore --no-default-features --features dynamodb
//! ```

// Tests always run against the in-memory backend.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
