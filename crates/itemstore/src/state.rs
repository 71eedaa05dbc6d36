//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The item repository is a trait object whose backend is
//! selected at compile time via feature flags.

use std::sync::Arc;

use itemstore_core::storage::ItemRepository;

#[cfg(any(feature = "inmemory", feature = "dynamodb"))]
use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Cannot enable both 'dynamodb' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// Cloned for each request handler. The repository is built once at startup
/// and shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Item repository for the configured table.
    pub item_repo: Arc<dyn ItemRepository>,
}

impl AppState {
    /// Creates a new AppState around an existing repository.
    pub fn with_repository(item_repo: Arc<dyn ItemRepository>) -> Self {
        Self { item_repo }
    }
}

// ============================================================================
// Feature-specific constructors
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory_init {
    use super::*;
    use crate::storage::inmemory::InMemoryRepository;

    impl AppState {
        /// Creates a new AppState backed by an in-memory repository.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(
                table = %config.table_name,
                "Using in-memory storage, data is lost on shutdown"
            );

            Ok(Self::with_repository(Arc::new(InMemoryRepository::new())))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb_init {
    use super::*;
    use crate::storage::dynamodb::DynamoDbRepository;

    impl AppState {
        /// Creates a new AppState backed by DynamoDB.
        ///
        /// Credentials come from the AWS SDK default chain. `AWS_ENDPOINT_URL`
        /// points the client at a local DynamoDB when set.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let region = aws_config::Region::new(config.aws_region.clone());
            let mut loader =
                aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

            if let Some(endpoint) = &config.aws_endpoint_url {
                loader = loader.endpoint_url(endpoint);
            }

            let aws_config = loader.load().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);

            tracing::info!(
                table = %config.table_name,
                region = %config.aws_region,
                endpoint = config.aws_endpoint_url.as_deref().unwrap_or("default"),
                "Using DynamoDB storage"
            );

            let item_repo = Arc::new(DynamoDbRepository::new(client, config.table_name.clone()));
            Ok(Self::with_repository(item_repo))
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        use crate::storage::inmemory::InMemoryRepository;

        Self::with_repository(Arc::new(InMemoryRepository::new()))
    }
}
