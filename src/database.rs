//! MongoDB connection bootstrap.

use log::info;
use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::Config;

/// Connect to MongoDB and confirm the server answers before returning the
/// database handle. Any failure here is meant to stop startup.
pub async fn connect(config: &Config) -> mongodb::error::Result<Database> {
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&config.mongodb_uri).await?;
    let db = client.database(&config.database_name);

    db.run_command(doc! { "ping": 1 }).await?;
    info!(
        "Connected to MongoDB successfully (database: {})",
        config.database_name
    );
    Ok(db)
}
