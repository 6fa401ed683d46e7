use anyhow::Result;
use std::sync::Arc;

use crate::schemas::AppState;
use crate::store::mongo::MongoStore;

/// Initialize application state against a MongoDB database.
///
/// The connection is established once here and lives for the process
/// lifetime; handlers receive it through `AppState`.
pub async fn initialize_app_state(mongo_uri: &str, database: &str) -> Result<AppState> {
    tracing::info!("Connecting to document store database: {}", database);
    let store = MongoStore::connect(mongo_uri, database).await?;
    store.ensure_indexes().await?;

    Ok(AppState {
        store: Arc::new(store),
    })
}
