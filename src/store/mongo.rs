//! MongoDB-backed document store.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::{options::IndexOptions, Client, Collection, IndexModel};
use tracing::{debug, info};

use common::DateRange;
use model::documents::exercise::{ExerciseDoc, EXERCISE_COLLECTION};
use model::documents::user::{UserDoc, USER_COLLECTION};

use super::{Store, StoreError};

/// Store implementation over a process-wide MongoDB client.
#[derive(Clone)]
pub struct MongoStore {
    database: mongodb::Database,
    users: Collection<UserDoc>,
    exercises: Collection<ExerciseDoc>,
}

impl MongoStore {
    /// Connect and verify the connection with a ping.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        info!("Connecting to MongoDB at {}", uri);

        // serverSelectionTimeoutMS keeps startup from hanging on an
        // unreachable server
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| StoreError::Connection(format!("failed to connect to MongoDB: {}", e)))?;

        let database = client.database(db_name);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            users: database.collection(USER_COLLECTION),
            exercises: database.collection(EXERCISE_COLLECTION),
            database,
        })
    }

    /// Create the collection indexes. Log queries are always scoped to a
    /// user and usually date-bounded.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "date": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_date_index".to_string())
                    .build(),
            )
            .build();

        self.exercises.create_index(index).await?;
        debug!("Applied index user_date_index on {}", EXERCISE_COLLECTION);

        Ok(())
    }

    /// Filter document for a user's exercises within `range`. Dates are
    /// stored as ISO `YYYY-MM-DD` strings, which order lexicographically
    /// the same as chronologically, so `$gte`/`$lte` stay correct.
    fn exercise_filter(user_id: &str, range: &DateRange) -> Document {
        let mut filter = doc! { "user_id": user_id };

        let mut bounds = Document::new();
        if let Some(from) = range.from {
            bounds.insert("$gte", from.to_string());
        }
        if let Some(to) = range.to {
            bounds.insert("$lte", to.to_string());
        }
        if !bounds.is_empty() {
            filter.insert("date", bounds);
        }

        filter
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn create_user(&self, username: &str) -> Result<UserDoc, StoreError> {
        let mut user = UserDoc::new(username.to_string());
        let result = self.users.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserDoc>, StoreError> {
        let cursor = self.users.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_user(&self, id: &str) -> Result<Option<UserDoc>, StoreError> {
        // An identifier that is not a valid ObjectId cannot match any
        // stored user.
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.users.find_one(doc! { "_id": oid }).await?)
    }

    async fn create_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: i32,
        date: NaiveDate,
    ) -> Result<ExerciseDoc, StoreError> {
        let mut exercise = ExerciseDoc::new(
            user_id.to_string(),
            description.to_string(),
            duration,
            date,
        );
        let result = self.exercises.insert_one(&exercise).await?;
        exercise.id = result.inserted_id.as_object_id();
        Ok(exercise)
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<ExerciseDoc>, StoreError> {
        let filter = Self::exercise_filter(user_id, &range);
        let cursor = self
            .exercises
            .find(filter)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
