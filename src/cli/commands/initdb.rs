use anyhow::Result;
use tracing::{debug, error, info, trace};

use crate::store::mongo::MongoStore;

pub async fn init_database(mongo_uri: &str, database: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing document store");
    debug!("MongoDB URI: {}", mongo_uri);
    debug!("Database name: {}", database);

    trace!("Attempting to connect to MongoDB");
    let store = match MongoStore::connect(mongo_uri, database).await {
        Ok(store) => {
            info!("Successfully connected to MongoDB");
            store
        }
        Err(e) => {
            error!("Failed to connect to MongoDB at '{}': {}", mongo_uri, e);
            return Err(e.into());
        }
    };

    info!("Creating collection indexes");
    match store.ensure_indexes().await {
        Ok(_) => {
            info!("Collection indexes created successfully");
        }
        Err(e) => {
            error!("Failed to create collection indexes: {}", e);
            return Err(e.into());
        }
    }

    info!("Document store initialization completed successfully!");
    trace!("init_database function completed");

    Ok(())
}
