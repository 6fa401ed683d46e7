use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Collection name for users.
pub const USER_COLLECTION: &str = "users";

/// A registered user.
///
/// Usernames are opaque and not unique; the store-generated `_id` is the
/// only identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDoc {
    /// Store-generated document ID. `None` until the document is persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
}

impl UserDoc {
    pub fn new(username: String) -> Self {
        Self { id: None, username }
    }

    /// Hex rendering of the identifier, as exposed on the wire.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}
