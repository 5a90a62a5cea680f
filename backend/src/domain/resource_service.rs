//! Generic create/read/update/delete over a [`ResourceRepository`].

use std::sync::Arc;

use tracing::warn;

use super::ports::{ResourceRepository, ResourceRepositoryError};
use super::{Error, FieldUpdate, Resource, translate_repository_error};

/// Resource access for one entity type.
///
/// Writes are followed by a separate read-back by key. The two statements are
/// not atomic, so a concurrent delete can make the read-back come up empty.
pub struct ResourceService<R: Resource> {
    repository: Arc<dyn ResourceRepository<R>>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(repository: Arc<dyn ResourceRepository<R>>) -> Self {
        Self { repository }
    }

    fn translate(failure: ResourceRepositoryError) -> Error {
        translate_repository_error(R::KIND, failure)
    }

    /// Every record of this type.
    pub async fn list(&self) -> Result<Vec<R>, Error> {
        self.repository.list().await.map_err(Self::translate)
    }

    /// Record under `key`; `None` is a normal outcome.
    pub async fn get_by_key(&self, key: &R::Key) -> Result<Option<R>, Error> {
        self.repository.find_by_key(key).await.map_err(Self::translate)
    }

    /// Insert a validated draft and read the stored record back.
    ///
    /// `Ok(None)` means the insert succeeded but the record was gone before it
    /// could be read.
    pub async fn create(&self, draft: &R::Draft) -> Result<Option<R>, Error> {
        let key = self
            .repository
            .insert(draft)
            .await
            .map_err(Self::translate)?;
        let created = self.get_by_key(&key).await?;
        if created.is_none() {
            warn!(resource = R::KIND.label(), key = %key, "created record vanished before read-back");
        }
        Ok(created)
    }

    /// Change one allow-listed column of the record under `key`.
    ///
    /// # Errors
    /// - `NotFound` when no record exists, checked before the column.
    /// - `UnknownField` when the column is not on the allow-list.
    /// - `InvalidRequest` when the value fails the column's rule or breaks a
    ///   reference.
    /// - `Conflict` when the new value collides with a uniqueness rule.
    /// - `NotFound` when the record disappears during the update.
    pub async fn partial_update(&self, key: &R::Key, update: &FieldUpdate) -> Result<R, Error> {
        if self.get_by_key(key).await?.is_none() {
            return Err(R::KIND.not_found());
        }
        let change = R::parse_change(update)?;
        let Some(updated_key) = self
            .repository
            .update_field(key, &change)
            .await
            .map_err(Self::translate)?
        else {
            return Err(R::KIND.not_found());
        };
        self.get_by_key(&updated_key)
            .await?
            .ok_or_else(|| R::KIND.not_found())
    }

    /// Remove the record under `key`; absent keys are not an error.
    pub async fn delete(&self, key: &R::Key) -> Result<(), Error> {
        self.repository.delete(key).await.map_err(Self::translate)
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
