//! In-memory store used by the test suite.
//!
//! Implements the same contract as the MongoDB backend against plain
//! vectors, so "store-native order" is insertion order here.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use std::sync::Mutex;

use common::DateRange;
use model::documents::{ExerciseDoc, UserDoc};

use super::{Store, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserDoc>>,
    exercises: Mutex<Vec<ExerciseDoc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, username: &str) -> Result<UserDoc, StoreError> {
        let user = UserDoc {
            id: Some(ObjectId::new()),
            username: username.to_string(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserDoc>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_user(&self, id: &str) -> Result<Option<UserDoc>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id_hex() == id)
            .cloned())
    }

    async fn create_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: i32,
        date: NaiveDate,
    ) -> Result<ExerciseDoc, StoreError> {
        let exercise = ExerciseDoc {
            id: Some(ObjectId::new()),
            user_id: user_id.to_string(),
            description: description.to_string(),
            duration,
            date,
        };
        self.exercises.lock().unwrap().push(exercise.clone());
        Ok(exercise)
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<ExerciseDoc>, StoreError> {
        Ok(self
            .exercises
            .lock()
            .unwrap()
            .iter()
            .filter(|exercise| exercise.user_id == user_id && range.contains(exercise.date))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn created_users_get_distinct_ids_and_list_in_insertion_order() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").await.unwrap();
        let bob = store.create_user("bob").await.unwrap();
        assert_ne!(alice.id_hex(), bob.id_hex());

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[1].username, "bob");
    }

    #[tokio::test]
    async fn find_user_resolves_ids_and_rejects_unknown_ones() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").await.unwrap();

        let found = store.find_user(&alice.id_hex()).await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));

        let unknown = store.find_user(&ObjectId::new().to_hex()).await.unwrap();
        assert!(unknown.is_none());

        let malformed = store.find_user("not-an-id").await.unwrap();
        assert!(malformed.is_none());
    }

    #[tokio::test]
    async fn find_exercises_scopes_filters_and_caps() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").await.unwrap();
        let bob = store.create_user("bob").await.unwrap();

        for day in [10, 15, 20] {
            store
                .create_exercise(&alice.id_hex(), "run", 30, date(2023, 1, day))
                .await
                .unwrap();
        }
        store
            .create_exercise(&bob.id_hex(), "swim", 20, date(2023, 1, 15))
            .await
            .unwrap();

        let all = store
            .find_exercises(&alice.id_hex(), DateRange::default(), 500)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let bounded = store
            .find_exercises(
                &alice.id_hex(),
                DateRange::new(Some(date(2023, 1, 15)), None),
                500,
            )
            .await
            .unwrap();
        assert_eq!(bounded.len(), 2);

        let capped = store
            .find_exercises(&alice.id_hex(), DateRange::default(), 1)
            .await
            .unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].date, date(2023, 1, 10));
    }
}
