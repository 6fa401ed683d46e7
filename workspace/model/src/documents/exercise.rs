use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Collection name for exercise log entries.
pub const EXERCISE_COLLECTION: &str = "exercises";

/// A single exercise log entry.
///
/// `user_id` is a reference to a user's identifier, not ownership; the
/// store does not enforce it. Entries are written once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDoc {
    /// Store-generated document ID. `None` until the document is persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Hex identifier of the owning user.
    pub user_id: String,
    pub description: String,
    /// Minutes by convention; the value itself is not range-checked.
    pub duration: i32,
    /// Calendar date of the exercise. Serialized as an ISO `YYYY-MM-DD`
    /// string, which orders lexicographically the same as chronologically.
    pub date: NaiveDate,
}

impl ExerciseDoc {
    pub fn new(user_id: String, description: String, duration: i32, date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            description,
            duration,
            date,
        }
    }
}
