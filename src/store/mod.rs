//! Document store abstraction.
//!
//! Handlers talk to the store through the [`Store`] trait carried in
//! `AppState`, so the request logic can be exercised against an in-memory
//! fake while production runs against MongoDB.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::DateRange;
use model::documents::{ExerciseDoc, UserDoc};
use thiserror::Error;

/// Errors surfaced by a store backend. Handlers map these to generic
/// responses; backend details never reach a response body.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to the document store: {0}")]
    Connection(String),
    #[error("document store operation failed: {0}")]
    Backend(#[from] mongodb::error::Error),
}

/// Per-collection create/find operations the service relies on.
///
/// Every method is a single round trip; consistency across calls is the
/// store's concern, not ours.
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Persist a new user and return it with its generated identifier.
    async fn create_user(&self, username: &str) -> Result<UserDoc, StoreError>;

    /// Every stored user, in store-native order.
    async fn list_users(&self) -> Result<Vec<UserDoc>, StoreError>;

    /// Look up a user by its identifier. An identifier that cannot name a
    /// stored user (malformed included) resolves to `None`.
    async fn find_user(&self, id: &str) -> Result<Option<UserDoc>, StoreError>;

    /// Persist a new exercise log entry for `user_id`.
    async fn create_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: i32,
        date: NaiveDate,
    ) -> Result<ExerciseDoc, StoreError>;

    /// A user's exercises within `range`, capped at `limit`, in
    /// store-native order.
    async fn find_exercises(
        &self,
        user_id: &str,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<ExerciseDoc>, StoreError>;
}
