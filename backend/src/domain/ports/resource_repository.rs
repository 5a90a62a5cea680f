//! Storage primitives behind the generic resource service.

use async_trait::async_trait;

use crate::domain::Resource;

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum ResourceRepositoryError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } =>
            "resource repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource repository query failed: {message}",
        /// A uniqueness or integrity rule rejected the write. The constraint
        /// name is empty when the store did not report one.
        ConstraintViolation { constraint: String } =>
            "resource repository constraint violated: {constraint}",
    }
}

/// Per-entity storage primitives.
///
/// Adapters perform exactly one statement per call; read-back after a write
/// is the service's job.
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Every stored record, in no particular order.
    async fn list(&self) -> Result<Vec<R>, ResourceRepositoryError>;

    /// Record stored under `key`, if any.
    async fn find_by_key(&self, key: &R::Key) -> Result<Option<R>, ResourceRepositoryError>;

    /// Insert `draft` and return the key the store assigned or accepted.
    async fn insert(&self, draft: &R::Draft) -> Result<R::Key, ResourceRepositoryError>;

    /// Apply one typed column change. Returns the key of the updated row, or
    /// `None` when no row matched.
    async fn update_field(
        &self,
        key: &R::Key,
        change: &R::Change,
    ) -> Result<Option<R::Key>, ResourceRepositoryError>;

    /// Remove the record under `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &R::Key) -> Result<(), ResourceRepositoryError>;
}
